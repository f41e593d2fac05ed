//! core::optional
//!
//! A value paired with an explicit "was it supplied" bit.
//!
//! # Why not `Option<T>`?
//!
//! Flag binding needs to tell "the user said nothing" apart from "the user
//! explicitly asked for the empty string / zero". `OptionalValue` carries that
//! provenance and only hands out its value when it was set, so consumers
//! cannot accidentally read the placeholder of an unset flag.
//!
//! # Example
//!
//! ```
//! use edgectl::core::optional::OptionalValue;
//!
//! let unset: OptionalValue<String> = OptionalValue::unset();
//! assert!(!unset.was_set());
//! assert_eq!(unset.get(), None);
//!
//! // An explicitly empty value is still "set".
//! let empty = OptionalValue::set(String::new());
//! assert!(empty.was_set());
//! assert_eq!(empty.get().map(String::as_str), Some(""));
//! ```

/// A flag-bound value with provenance.
///
/// The inner value is private: it is only observable through accessors that
/// check `was_set` first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionalValue<T> {
    was_set: bool,
    value: T,
}

impl<T> OptionalValue<T> {
    /// An explicitly supplied value.
    pub fn set(value: T) -> Self {
        Self {
            was_set: true,
            value,
        }
    }

    /// A value the user never supplied.
    pub fn unset() -> Self
    where
        T: Default,
    {
        Self {
            was_set: false,
            value: T::default(),
        }
    }

    /// Build from a parsed flag, where `was_set` comes from the flag parser
    /// and `value` may be a default placeholder.
    pub fn from_parts(was_set: bool, value: T) -> Self {
        Self { was_set, value }
    }

    /// Whether the value was explicitly supplied.
    pub fn was_set(&self) -> bool {
        self.was_set
    }

    /// The value, if it was supplied.
    pub fn get(&self) -> Option<&T> {
        self.was_set.then_some(&self.value)
    }

    /// Fallible map applied only to a set value; unset values become
    /// `OptionalValue::unset()` of the target type.
    pub fn try_map_set<U, E>(
        self,
        f: impl FnOnce(T) -> Result<U, E>,
    ) -> Result<OptionalValue<U>, E>
    where
        U: Default,
    {
        if self.was_set {
            Ok(OptionalValue::set(f(self.value)?))
        } else {
            Ok(OptionalValue::unset())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_hides_placeholder() {
        let v = OptionalValue::from_parts(false, 42u64);
        assert!(!v.was_set());
        assert_eq!(v.get(), None);
    }

    #[test]
    fn set_zero_is_visible() {
        let v = OptionalValue::set(0u64);
        assert!(v.was_set());
        assert_eq!(v.get(), Some(&0));
    }

    #[test]
    fn try_map_set_skips_unset() {
        let unset = OptionalValue::from_parts(false, "not-a-number".to_string());
        let mapped: OptionalValue<u64> = unset.try_map_set(|s| s.parse::<u64>()).unwrap();
        assert!(!mapped.was_set());

        let set = OptionalValue::set("7".to_string());
        let mapped: OptionalValue<u64> = set.try_map_set(|s| s.parse::<u64>()).unwrap();
        assert_eq!(mapped.get(), Some(&7));
    }
}
