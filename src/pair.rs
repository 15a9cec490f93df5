use crate::error::ProducerError;
use crate::pull::Pull;

pub struct Pair<A, B> {
    left: A,
    right: B,
    done: bool,
}

impl<A, B> Pair<A, B> {
    pub fn new(left: A, right: B) -> Self
    where
        A: Pull,
        B: Pull,
    {
        Pair {
            left,
            right,
            done: false,
        }
    }
}

impl<A, B> Pair<A, B>
where
    A: Pull,
    B: Pull,
{
    // Left first, then right. A left value pulled in the step where the
    // right side runs out is dropped; once the left side runs out the
    // right side is not pulled at all.
    fn advance(
        &mut self,
    ) -> Result<Option<(A::Item, B::Item)>, ProducerError> {
        let Some(left) = self.left.next()? else {
            return Ok(None);
        };
        Ok(self.right.next()?.map(|right| (left, right)))
    }
}

impl<A, B> Pull for Pair<A, B>
where
    A: Pull,
    B: Pull,
{
    type Item = (A::Item, B::Item);

    fn next(&mut self) -> Result<Option<Self::Item>, ProducerError> {
        if self.done {
            return Ok(None);
        }
        match self.advance() {
            Ok(Some(pair)) => Ok(Some(pair)),
            outcome => {
                // First exhaustion or failure ends the pairing; close both
                // sides so neither producer is left parked.
                self.close();
                outcome
            }
        }
    }

    fn close(&mut self) {
        self.done = true;
        self.left.close();
        self.right.close();
    }
}

/// Free-function form of [`Pull::pair`].
pub fn pair<A, B>(left: A, right: B) -> Pair<A, B>
where
    A: Pull,
    B: Pull,
{
    Pair::new(left, right)
}
