use crate::error::ProducerError;
use crate::pull::Pull;

pub struct Transform<K, F> {
    source: K,
    f: F,
}

impl<K, F> Transform<K, F> {
    pub fn new<U>(source: K, f: F) -> Self
    where
        K: Pull,
        F: FnMut(K::Item) -> U,
    {
        Transform { source, f }
    }
}

impl<K, F, U> Pull for Transform<K, F>
where
    K: Pull,
    F: FnMut(K::Item) -> U,
{
    type Item = U;

    fn next(&mut self) -> Result<Option<U>, ProducerError> {
        Ok(self.source.next()?.map(&mut self.f))
    }

    fn close(&mut self) {
        self.source.close();
    }
}

/// Free-function form of [`Pull::transform`].
pub fn transform<K, F, U>(source: K, f: F) -> Transform<K, F>
where
    K: Pull,
    F: FnMut(K::Item) -> U,
{
    Transform::new(source, f)
}
