use core::fmt::Debug;

use crate::pull::Pull;

/// Extension trait providing assertion methods for testing pull sources.
///
/// This trait is separate from [`Pull`] to keep the core trait focused on
/// essential operations. Import it in your tests to chain expectations
/// against a source:
///
/// ```rust
/// use lazygen::Pull;
/// use lazygen::PullAssertions;
/// use lazygen::generate;
///
/// generate(|mut out| {
///     out.yield_(1);
///     out.yield_(2);
/// })
/// .assert_yields(1)
/// .assert_yields(2)
/// .assert_exhausted();
/// ```
pub trait PullAssertions: Pull {
    /// Pulls once and asserts that the source yields `expected`. Panics if
    /// it is exhausted, fails, or yields a different value.
    ///
    /// Returns the source so assertions can be chained.
    fn assert_yields(mut self, expected: Self::Item) -> Self
    where
        Self: Sized,
        Self::Item: PartialEq + Debug,
    {
        match self.next() {
            Ok(Some(actual)) => {
                assert_eq!(
                    actual, expected,
                    "expected {expected:?}, got {actual:?}"
                );
                self
            }
            Ok(None) => panic!("expected {expected:?}, got exhaustion"),
            Err(error) => {
                panic!("expected {expected:?}, got failure: {error}")
            }
        }
    }

    /// Pulls once and asserts that the source is exhausted. Panics if it
    /// yields a value or fails.
    ///
    /// Exhaustion is permanent, so this can be chained as many times as
    /// you like.
    fn assert_exhausted(mut self) -> Self
    where
        Self: Sized,
        Self::Item: Debug,
    {
        match self.next() {
            Ok(Some(actual)) => {
                panic!("expected exhaustion, got {actual:?}")
            }
            Ok(None) => self,
            Err(error) => panic!("expected exhaustion, got failure: {error}"),
        }
    }

    /// Pulls once and asserts that the source reports a producer failure
    /// whose message contains `fragment`. Panics if it yields a value or
    /// is exhausted instead.
    fn assert_fails(mut self, fragment: &str) -> Self
    where
        Self: Sized,
        Self::Item: Debug,
    {
        match self.next() {
            Ok(Some(actual)) => panic!("expected failure, got {actual:?}"),
            Ok(None) => panic!("expected failure, got exhaustion"),
            Err(error) => {
                assert!(
                    error.message().contains(fragment),
                    "expected failure mentioning {fragment:?}, got: {error}"
                );
                self
            }
        }
    }
}

/// Blanket implementation of [`PullAssertions`] for all types implementing
/// [`Pull`].
impl<K> PullAssertions for K where K: Pull {}
