//! The `lazygen` crate emulates suspendable generators (computations that
//! produce a sequence of values lazily, pausing their internal progress
//! between requests) on stable Rust, without generator syntax, `Pin`, or
//! unsafe code.
//!
//! A *generator* here is a producer body running on its own thread,
//! cooperating with exactly one consumer through a pair of one-slot
//! channels: the consumer sends a request, the producer computes exactly
//! one value, hands it over, and parks again. The body is plain imperative
//! code handed a yield capability:
//!
//! ```rust
//! use lazygen::Pull;
//! use lazygen::generate;
//!
//! let mut numbers = generate(|mut out| {
//!     out.yield_(1);
//!     out.yield_(2);
//!     out.yield_(3);
//! });
//!
//! assert_eq!(numbers.next().unwrap(), Some(1));
//! assert_eq!(numbers.next().unwrap(), Some(2));
//! assert_eq!(numbers.next().unwrap(), Some(3));
//! assert_eq!(numbers.next().unwrap(), None);
//! ```
//!
//! The consumer-side contract is the [`Pull`] trait: `next()` pulls one
//! value, `close()` abandons the source, and the provided combinators
//! build derived sources with no concurrency logic of their own:
//!
//!   * [`Pull::transform`] re-wraps each pulled value through a closure.
//!   * [`Pull::pair`] pulls two sources in lockstep, truncating at the
//!     shorter one.
//!   * [`Pull::iter`] bridges into `std::iter::Iterator` for `for` loops
//!     and `collect()`.
//!
//! ```rust
//! use lazygen::Pull;
//! use lazygen::from_iter;
//! use lazygen::pair;
//!
//! let x = vec![1, 2, 3];
//! let y = vec![4, 5, 6];
//! let zipped = pair(from_iter(x), from_iter(y));
//!
//! for outcome in zipped.iter() {
//!     let (a, b) = outcome.unwrap();
//!     println!("({a}, {b})");
//! }
//! ```
//!
//! # Laziness and ordering
//!
//! Construction spawns the producer thread but runs none of its body: the
//! thread parks before the first statement, and a generator that is never
//! pulled performs no work at all. Values are observed in exactly the
//! order the producer yields them; the one-slot handshake enforces a
//! strict request, produce, park alternation, so there is never more than
//! one value in flight and never any read-ahead buffering.
//!
//! # Closing and resource use
//!
//! A generator owns an OS thread, so abandoning one mid-sequence is a
//! resource question, not just a semantic one. [`Pull::close`] (also run
//! by `Drop`) disconnects the handshake channels; a producer parked at a
//! yield point observes the disconnect immediately, unwinds, and its
//! thread is joined before `close()` returns. Closing is idempotent, and
//! pulling a closed or exhausted generator is defined behavior: it
//! answers `Ok(None)`, never an error.
//!
//! ```rust
//! use lazygen::Pull;
//! use lazygen::State;
//! use lazygen::generate;
//!
//! let mut endless = generate(|mut out| {
//!     let mut n = 0u64;
//!     loop {
//!         out.yield_(n);
//!         n += 1;
//!     }
//! });
//!
//! assert_eq!(endless.next().unwrap(), Some(0));
//! endless.close();
//! assert_eq!(endless.state(), State::Closed);
//! assert_eq!(endless.next().unwrap(), None);
//! ```
//!
//! # Producer failures
//!
//! A panic inside the producer body never crosses thread boundaries on its
//! own. It is caught on the producer thread and delivered to the consumer
//! as a [`ProducerError`] on the next pull, after which the generator is
//! exhausted. Failures are never silently dropped while the generator is
//! being consumed; a failure nobody pulls is discarded only when the
//! generator is closed.
//!
//! # Design notes
//!
//! ## Why a thread per generator?
//!
//! The point of this crate is the *handshake*, not the scheduler. A
//! dedicated thread plus two bounded(1) channels is the smallest thing
//! that lets ordinary imperative code suspend mid-execution on stable
//! Rust: the body keeps its whole call stack across yield points, so it
//! can yield from inside helper functions and loops, which a manual
//! state-machine rewrite of the body cannot offer without language
//! support. The cost is an OS thread per live generator, which is the
//! wrong trade for thousands of tiny sequences (use `Iterator`) and a
//! fine one for the few, coarse, genuinely suspendable computations this
//! crate is for.
//!
//! ## Why is `next()` fallible?
//!
//! `Iterator::next` has nowhere to put a mid-sequence failure, which is
//! why iterator-returning APIs in std (`std::io::Lines`, `read_dir`) make
//! the *item* a `Result` instead. `Pull::next` keeps the failure channel
//! in the method signature, `Result<Option<T>, ProducerError>`, so a
//! loop can stop on the first error without inspecting every item, and
//! [`Pull::iter`] recovers the std shape when a plain iterator is wanted.
//!
//! ## One consumer at a time
//!
//! `next()` and `close()` take `&mut self`, so a single generator cannot
//! be pulled concurrently without external serialization. A
//! `Mutex<Generator<T>>` makes interleaved pulls from several threads
//! safe without changing observable ordering.

mod assertions;
mod error;
mod from_iter;
mod generator;
mod iter;
mod pair;
mod pull;
mod transform;

pub use assertions::PullAssertions;
pub use error::ProducerError;
pub use from_iter::from_iter;
pub use generator::Builder;
pub use generator::Generator;
pub use generator::State;
pub use generator::Yielder;
pub use generator::generate;
pub use iter::Iter;
pub use pair::Pair;
pub use pair::pair;
pub use pull::Pull;
pub use transform::Transform;
pub use transform::transform;

#[cfg(test)]
mod test;
