use crate::error::ProducerError;
use crate::pull::Pull;

/// Iterator adapter over a [`Pull`] source, created by [`Pull::iter`].
///
/// Items are `Result`s so a producer failure stays observable: yielded
/// values arrive as `Ok`, a failure as a single `Err`, and exhaustion ends
/// the iteration.
pub struct Iter<K> {
    source: K,
}

impl<K> Iter<K> {
    pub(crate) fn new(source: K) -> Self
    where
        K: Pull,
    {
        Iter { source }
    }
}

impl<K: Pull> Iterator for Iter<K> {
    type Item = Result<K::Item, ProducerError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.source.next() {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => None,
            Err(error) => Some(Err(error)),
        }
    }
}
