/// A visual property that several extensions can compete to own.
///
/// `set` replaces the value iff the new priority is at least the current one, so
/// the highest priority seen so far wins and ties go to the most recent caller.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Prioritized<T> {
    value: T,
    priority: i32,
}

impl<T> Prioritized<T> {
    /// Wraps a default value at priority 0.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self { value, priority: 0 }
    }

    /// Returns `true` when the value was replaced.
    #[inline]
    pub fn set(&mut self, value: T, priority: i32) -> bool {
        if priority >= self.priority {
            self.value = value;
            self.priority = priority;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T: Copy> Prioritized<T> {
    #[inline]
    pub fn get(&self) -> T {
        self.value
    }
}

impl<T: Default> Default for Prioritized<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn lower_priority_is_ignored() {
        let mut p = Prioritized::new(1.0f32);
        assert!(p.set(2.0, 5));
        assert!(!p.set(3.0, 4));
        assert_eq!(p.get(), 2.0);
        assert_eq!(p.priority(), 5);
    }

    #[test]
    fn equal_priority_last_write_wins() {
        let mut p = Prioritized::new("default");
        p.set("first", 3);
        p.set("second", 3);
        assert_eq!(*p.value(), "second");
    }

    #[test]
    fn negative_priority_loses_to_default() {
        let mut p = Prioritized::new(1u8);
        assert!(!p.set(9, -1));
        assert_eq!(p.get(), 1);
    }

    proptest! {
        #[test]
        fn effective_value_is_latest_of_highest(calls in prop::collection::vec((any::<u16>(), 0i32..8), 1..40)) {
            let mut p = Prioritized::new(u16::MAX);
            for &(v, prio) in &calls {
                p.set(v, prio);
            }
            let top = calls.iter().map(|&(_, prio)| prio).max().unwrap_or(0);
            let expected = calls.iter().rev().find(|&&(_, prio)| prio == top).map(|&(v, _)| v);
            prop_assert_eq!(Some(p.get()), expected);
            prop_assert_eq!(p.priority(), top);
        }
    }
}
