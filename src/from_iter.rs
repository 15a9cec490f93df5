use crate::generator::Generator;

/// Spawns a generator that yields every element of an iterable.
///
/// The iterable is moved into the producer thread and first touched on the
/// first pull, so building a generator from an expensive iterator performs
/// no work up front.
///
/// ```rust
/// use lazygen::Pull;
/// use lazygen::PullAssertions;
/// use lazygen::from_iter;
///
/// from_iter(1..=3)
///     .assert_yields(1)
///     .assert_yields(2)
///     .assert_yields(3)
///     .assert_exhausted();
/// ```
pub fn from_iter<I>(values: I) -> Generator<I::Item>
where
    I: IntoIterator + Send + 'static,
    I::Item: Send + 'static,
{
    Generator::new(move |mut out| {
        for value in values {
            out.yield_(value);
        }
    })
}
