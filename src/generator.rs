use std::fmt;
use std::io;
use std::panic::AssertUnwindSafe;
use std::panic::catch_unwind;
use std::panic::resume_unwind;
use std::thread;
use std::thread::JoinHandle;

use crossbeam_channel::Receiver;
use crossbeam_channel::Sender;
use crossbeam_channel::bounded;
use log::debug;
use log::trace;

use crate::error::ProducerError;
use crate::pull::Pull;

/// The lifecycle of a [`Generator`].
///
/// `Exhausted` and `Closed` are terminal: no transition ever leaves them,
/// and a generator in either state answers every pull with `Ok(None)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Constructed; the producer thread is parked and has run no body code.
    Idle,
    /// The producer has yielded at least once and is parked at a yield
    /// point, ready to resume.
    AwaitingRequest,
    /// The producer is computing the next value. Only ever current while
    /// the consumer is blocked inside [`Pull::next`].
    Producing,
    /// The producer body ran to completion (or failed); no more values.
    Exhausted,
    /// The consumer abandoned the generator via [`Pull::close`].
    Closed,
}

/// One message through the value slot, producer to consumer.
enum Step<T> {
    Yielded(T),
    Finished,
    Failed(ProducerError),
}

/// Sentinel panic payload used to unwind a producer body whose consumer has
/// gone away. Raised with `resume_unwind` so the panic hook stays silent,
/// and caught by the producer harness, never observed outside this module.
struct Interrupted;

/// The yield capability handed to a producer body.
///
/// A body receives a `Yielder` by value and calls [`yield_`](Self::yield_)
/// once per emitted value. Each call hands the value to the consumer and
/// parks the producer thread until the next pull. There is no other way to
/// obtain a `Yielder`, so only the producer it belongs to can emit values.
pub struct Yielder<T> {
    steps: Sender<Step<T>>,
    requests: Receiver<()>,
}

impl<T> Yielder<T> {
    /// Emits one value and suspends until the consumer asks for the next.
    ///
    /// If the consumer has closed or dropped the generator, this call never
    /// returns: it unwinds the producer body so the thread can terminate
    /// instead of computing values nobody will pull.
    pub fn yield_(&mut self, value: T) {
        if self.steps.send(Step::Yielded(value)).is_err() {
            resume_unwind(Box::new(Interrupted));
        }
        if self.requests.recv().is_err() {
            resume_unwind(Box::new(Interrupted));
        }
    }
}

/// Consumer-side endpoints of the handshake. Dropping it is the
/// cancellation signal: every producer park point watches its channel, and
/// a disconnected channel wakes the park with an error immediately.
struct Link<T> {
    requests: Sender<()>,
    steps: Receiver<Step<T>>,
}

/// A suspendable computation that produces values one pull at a time.
///
/// The producer body runs on a dedicated thread, but lazily: construction
/// parks the thread before any body code executes, and each
/// [`next`](Pull::next) call resumes it for exactly one value. Between
/// pulls the producer is suspended at its last yield point, so an unpulled
/// generator performs no work and holds no value besides the one in flight.
///
/// ```rust
/// use lazygen::Pull;
/// use lazygen::generate;
///
/// let mut numbers = generate(|mut out| {
///     out.yield_(1);
///     out.yield_(2);
///     out.yield_(3);
/// });
///
/// assert_eq!(numbers.next().unwrap(), Some(1));
/// assert_eq!(numbers.next().unwrap(), Some(2));
/// assert_eq!(numbers.next().unwrap(), Some(3));
/// assert_eq!(numbers.next().unwrap(), None);
/// ```
///
/// A `Generator<T>` is `Send` whenever `T` is, so it can be handed to
/// another thread and pulled there. It supports exactly one caller at a
/// time, which `&mut self` enforces; wrap it in a `Mutex` to interleave
/// pulls from several threads.
///
/// Dropping a generator closes it: the producer thread is woken, unwound,
/// and joined, so a generator abandoned halfway through its sequence does
/// not leak its thread.
pub struct Generator<T> {
    link: Option<Link<T>>,
    producer: Option<JoinHandle<()>>,
    state: State,
}

/// Configures a [`Generator`] before spawning its producer thread.
///
/// This mirrors `std::thread::Builder`: the plain constructors panic if the
/// OS refuses to spawn a thread, while [`Builder::spawn`] surfaces that as
/// an `io::Error`. The name and stack size apply to the producer thread,
/// which is mostly useful to make deep or long-lived producers show up
/// legibly in debuggers and panic messages.
///
/// ```rust
/// use lazygen::Builder;
/// use lazygen::Pull;
///
/// let mut numbers = Builder::new()
///     .name("numbers-producer")
///     .stack_size(64 * 1024)
///     .spawn(|mut out| {
///         out.yield_(7);
///     })
///     .expect("failed to spawn producer thread");
///
/// assert_eq!(numbers.next().unwrap(), Some(7));
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    name: Option<String>,
    stack_size: Option<usize>,
}

impl Builder {
    pub fn new() -> Self {
        Builder::default()
    }

    /// Names the producer thread.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the stack size of the producer thread, in bytes.
    pub fn stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = Some(stack_size);
        self
    }

    /// Spawns the producer thread and returns the generator handle.
    ///
    /// The thread parks immediately: no body code runs until the first
    /// pull. Fails only if the OS cannot spawn a thread.
    pub fn spawn<T, F>(self, body: F) -> io::Result<Generator<T>>
    where
        T: Send + 'static,
        F: FnOnce(Yielder<T>) + Send + 'static,
    {
        let (request_tx, request_rx) = bounded(1);
        let (step_tx, step_rx) = bounded(1);

        let mut producer = thread::Builder::new();
        if let Some(name) = self.name {
            producer = producer.name(name);
        }
        if let Some(stack_size) = self.stack_size {
            producer = producer.stack_size(stack_size);
        }
        let producer =
            producer.spawn(move || run_producer(body, request_rx, step_tx))?;
        trace!("spawned producer thread {:?}", producer.thread().name());

        Ok(Generator {
            link: Some(Link {
                requests: request_tx,
                steps: step_rx,
            }),
            producer: Some(producer),
            state: State::Idle,
        })
    }
}

/// Drives a producer body on its own thread.
///
/// The first request is awaited *before* the body is entered, which is what
/// makes construction free of side effects. A body panic is caught here and
/// forwarded as a [`ProducerError`]; the [`Interrupted`] sentinel from a
/// closed consumer is swallowed so the thread exits quietly.
fn run_producer<T, F>(body: F, requests: Receiver<()>, steps: Sender<Step<T>>)
where
    F: FnOnce(Yielder<T>),
{
    if requests.recv().is_err() {
        // Dropped before the first pull; the body never runs.
        return;
    }
    let yielder = Yielder {
        steps: steps.clone(),
        requests,
    };
    match catch_unwind(AssertUnwindSafe(move || body(yielder))) {
        Ok(()) => {
            let _ = steps.send(Step::Finished);
        }
        Err(payload) if payload.is::<Interrupted>() => {}
        Err(payload) => {
            let error = ProducerError::from_panic(payload);
            debug!("captured producer failure: {}", error.message());
            let _ = steps.send(Step::Failed(error));
        }
    }
}

impl<T> Generator<T> {
    /// Spawns a generator whose producer runs `body` to completion, calling
    /// `yield_` once per emitted value.
    ///
    /// # Panics
    ///
    /// Panics if the OS refuses to spawn the producer thread, like
    /// `std::thread::spawn`. Use [`Builder::spawn`] to handle that case.
    pub fn new<F>(body: F) -> Self
    where
        T: Send + 'static,
        F: FnOnce(Yielder<T>) + Send + 'static,
    {
        Builder::new()
            .spawn(body)
            .expect("failed to spawn producer thread")
    }

    /// The current lifecycle state of this generator.
    pub fn state(&self) -> State {
        self.state
    }

    /// Tears down the handshake and waits for the producer thread to exit.
    fn shutdown(&mut self, terminal: State) {
        self.link = None;
        self.state = terminal;
        if let Some(producer) = self.producer.take() {
            let _ = producer.join();
        }
    }
}

impl<T> Pull for Generator<T> {
    type Item = T;

    fn next(&mut self) -> Result<Option<T>, ProducerError> {
        let Some(link) = &self.link else {
            return Ok(None);
        };
        // Strict alternation leaves the request slot empty here, so this
        // send cannot block. It errs once the producer has terminated on
        // its own, in which case the answer is already in the value slot.
        let _ = link.requests.send(());
        self.state = State::Producing;
        match link.steps.recv() {
            Ok(Step::Yielded(value)) => {
                self.state = State::AwaitingRequest;
                Ok(Some(value))
            }
            Ok(Step::Finished) | Err(_) => {
                self.shutdown(State::Exhausted);
                Ok(None)
            }
            Ok(Step::Failed(error)) => {
                self.shutdown(State::Exhausted);
                Err(error)
            }
        }
    }

    fn close(&mut self) {
        if self.link.is_none() {
            return;
        }
        debug!("closing generator before exhaustion");
        self.shutdown(State::Closed);
    }
}

impl<T> Drop for Generator<T> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<T> fmt::Debug for Generator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Spawns a generator from a producer body. Free-function form of
/// [`Generator::new`].
///
/// ```rust
/// use lazygen::Pull;
/// use lazygen::generate;
///
/// let mut letters = generate(|mut out| {
///     out.yield_('a');
///     out.yield_('b');
/// });
///
/// assert_eq!(letters.next().unwrap(), Some('a'));
/// assert_eq!(letters.next().unwrap(), Some('b'));
/// assert_eq!(letters.next().unwrap(), None);
/// ```
pub fn generate<T, F>(body: F) -> Generator<T>
where
    T: Send + 'static,
    F: FnOnce(Yielder<T>) + Send + 'static,
{
    Generator::new(body)
}
