/// One `[begin, end]` interval and the value attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeEntry<V> {
    begin: f64,
    end: f64,
    value: V
}

impl<V> RangeEntry<V> {
    pub fn begin(&self) -> f64 {
        self.begin
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn value(&self) -> &V {
        &self.value
    }
}


/// Sorted list of non-overlapping position intervals.
///
/// Lookups are `O(log n)`. An interval owns its begin bound; the end bound belongs to
/// the next interval when two intervals touch.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeMap<V> {
    entries: Vec<RangeEntry<V>>
}

impl<V> Default for RangeMap<V> {
    fn default() -> Self {
        RangeMap { entries: Vec::new() }
    }
}

impl<V> RangeMap<V> {
    pub fn new() -> RangeMap<V> {
        RangeMap::default()
    }

    /// Builds the map from unordered ranges. Empty or reversed ranges are ignored, and a
    /// range overlapping an earlier one (in begin order) is clipped to start where the
    /// earlier one ends.
    pub fn from_ranges(ranges: Vec<(f64, f64, V)>) -> RangeMap<V> {
        let mut ranges: Vec<(f64, f64, V)> = ranges
            .into_iter()
            .filter(|(begin, end, _)| end > begin)
            .collect();
        ranges.sort_by(|lhs, rhs| lhs.0.total_cmp(&rhs.0));

        let mut entries: Vec<RangeEntry<V>> = Vec::with_capacity(ranges.len());
        for (begin, end, value) in ranges {
            let begin = match entries.last() {
                Some(last) => begin.max(last.end),
                None => begin
            };
            if end > begin {
                entries.push(RangeEntry { begin, end, value });
            }
        }
        RangeMap { entries }
    }

    pub fn get(&self, position: f64) -> Option<&V> {
        let index = self.entries.partition_point(|entry| entry.begin <= position);
        if index == 0 {
            return None;
        }
        let entry = &self.entries[index - 1];
        if position < entry.end || (position == entry.end && index == self.entries.len()) {
            Some(&entry.value)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RangeEntry<V>> {
        self.entries.iter()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_inside_and_between_ranges() {
        let map = RangeMap::from_ranges(vec![(10.0, 20.0, "b"), (0.0, 5.0, "a")]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(0.0), Some(&"a"));
        assert_eq!(map.get(4.9), Some(&"a"));
        assert_eq!(map.get(5.0), None);
        assert_eq!(map.get(7.0), None);
        assert_eq!(map.get(10.0), Some(&"b"));
        assert_eq!(map.get(20.0), Some(&"b"));
        assert_eq!(map.get(20.1), None);
        assert_eq!(map.get(-1.0), None);
    }

    #[test]
    fn touching_ranges_hand_over_at_boundary() {
        let map = RangeMap::from_ranges(vec![(0.0, 5.0, 1), (5.0, 8.0, 2)]);
        assert_eq!(map.get(5.0), Some(&2));
    }

    #[test]
    fn overlapping_ranges_are_clipped() {
        let map = RangeMap::from_ranges(vec![(0.0, 6.0, 1), (4.0, 8.0, 2), (3.0, 3.0, 3)]);
        let entries: Vec<(f64, f64)> = map.iter().map(|e| (e.begin(), e.end())).collect();
        assert_eq!(entries, vec![(0.0, 6.0), (6.0, 8.0)]);
    }
}
