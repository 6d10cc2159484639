//! Most-frequent-element search built on [`ChainingMap`]

use crate::ChainingMap;

/// The most frequent element(s) of a sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mode {
    /// Every distinct element reaching `frequency`, in the counting map's enumeration order
    pub values: Vec<String>,
    /// Number of occurrences of each element in `values`
    pub frequency: usize,
}

/// Finds the element(s) that occur most often in `items`.
///
/// Occurrences are counted in a default [`ChainingMap`]; ties are all reported. An empty input
/// yields no values and a frequency of 0.
///
/// ```rust
/// use primal_maps::find_mode;
///
/// let mode = find_mode(["apple", "apple", "grape", "melon", "peach"]);
/// assert_eq!(mode.values, vec!["apple"]);
/// assert_eq!(mode.frequency, 2);
/// ```
#[must_use]
pub fn find_mode<I, S>(items: I) -> Mode
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: ChainingMap<usize> = ChainingMap::new();
    for item in items {
        let item = item.as_ref();
        let count = counts.get(item).map_or(1, |count| count.saturating_add(1));
        counts.put(item, count);
    }

    let mut mode = Mode::default();
    for (value, &count) in &counts {
        if count > mode.frequency {
            mode.frequency = count;
            mode.values.clear();
            mode.values.push(value.to_owned());
        } else if count == mode.frequency {
            mode.values.push(value.to_owned());
        }
    }
    mode
}
