use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering::SeqCst;

use crate::*;

fn one_two_three() -> Generator<i32> {
    generate(|mut out| {
        out.yield_(1);
        out.yield_(2);
        out.yield_(3);
    })
}

#[test]
fn yields_values_in_order_then_exhausts() {
    one_two_three()
        .assert_yields(1)
        .assert_yields(2)
        .assert_yields(3)
        .assert_exhausted()
        .assert_exhausted();
}

#[test]
fn construction_runs_no_body_code() {
    let effects = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&effects);
    let numbers = generate(move |mut out| {
        counter.fetch_add(1, SeqCst);
        out.yield_(1);
    });
    drop(numbers);
    assert_eq!(effects.load(SeqCst), 0);
}

#[test]
fn state_follows_the_lifecycle() {
    let mut numbers = one_two_three();
    assert_eq!(numbers.state(), State::Idle);
    assert_eq!(numbers.next().unwrap(), Some(1));
    assert_eq!(numbers.state(), State::AwaitingRequest);
    assert_eq!(numbers.next().unwrap(), Some(2));
    assert_eq!(numbers.next().unwrap(), Some(3));
    assert_eq!(numbers.state(), State::AwaitingRequest);
    assert_eq!(numbers.next().unwrap(), None);
    assert_eq!(numbers.state(), State::Exhausted);
}

#[test]
fn close_is_idempotent() {
    let mut numbers = one_two_three();
    assert_eq!(numbers.next().unwrap(), Some(1));
    numbers.close();
    numbers.close();
    numbers.close();
    assert_eq!(numbers.state(), State::Closed);
    assert_eq!(numbers.next().unwrap(), None);
    assert_eq!(numbers.next().unwrap(), None);
}

#[test]
fn close_after_exhaustion_is_a_no_op() {
    let mut numbers = one_two_three();
    while numbers.next().unwrap().is_some() {}
    assert_eq!(numbers.state(), State::Exhausted);
    numbers.close();
    assert_eq!(numbers.state(), State::Exhausted);
}

#[test]
fn instances_are_independent() {
    let mut a = one_two_three();
    let mut b = one_two_three();
    assert_eq!(a.next().unwrap(), Some(1));
    assert_eq!(a.next().unwrap(), Some(2));
    assert_eq!(b.next().unwrap(), Some(1));
    assert_eq!(a.next().unwrap(), Some(3));
    assert_eq!(b.next().unwrap(), Some(2));
    assert_eq!(a.next().unwrap(), None);
    assert_eq!(b.next().unwrap(), Some(3));
    assert_eq!(b.next().unwrap(), None);
}

struct SetOnDrop(Arc<AtomicBool>);

impl Drop for SetOnDrop {
    fn drop(&mut self) {
        self.0.store(true, SeqCst);
    }
}

#[test]
fn close_unwinds_a_parked_producer() {
    let unwound = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&unwound);
    let mut counting = generate(move |mut out| {
        let _guard = SetOnDrop(flag);
        let mut n = 0u32;
        loop {
            out.yield_(n);
            n += 1;
        }
    });
    assert_eq!(counting.next().unwrap(), Some(0));
    assert_eq!(counting.next().unwrap(), Some(1));
    counting.close();
    // close() joins the producer thread, so the body has been unwound by
    // the time it returns.
    assert!(unwound.load(SeqCst));
    assert_eq!(counting.next().unwrap(), None);
}

#[test]
fn drop_unwinds_a_parked_producer() {
    let unwound = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&unwound);
    let mut counting = generate(move |mut out| {
        let _guard = SetOnDrop(flag);
        loop {
            out.yield_(());
        }
    });
    assert_eq!(counting.next().unwrap(), Some(()));
    drop(counting);
    assert!(unwound.load(SeqCst));
}

#[test]
fn producer_failure_surfaces_on_the_next_pull() {
    let mut faulty = generate(|mut out| {
        out.yield_(1);
        panic!("boom");
    });
    assert_eq!(faulty.next().unwrap(), Some(1));
    let error = faulty.next().unwrap_err();
    assert!(error.message().contains("boom"));
    assert_eq!(faulty.state(), State::Exhausted);
    assert_eq!(faulty.next().unwrap(), None);
    assert_eq!(faulty.next().unwrap(), None);
}

#[test]
fn failure_before_the_first_yield() {
    generate::<i32, _>(|_out| panic!("no values at all"))
        .assert_fails("no values at all")
        .assert_exhausted();
}

#[test]
fn builder_configures_the_producer_thread() {
    let mut named = Builder::new()
        .name("numbers-producer")
        .stack_size(128 * 1024)
        .spawn(|mut out| {
            let name = std::thread::current()
                .name()
                .map(str::to_string)
                .unwrap_or_default();
            out.yield_(name);
        })
        .expect("failed to spawn producer thread");
    assert_eq!(named.next().unwrap().as_deref(), Some("numbers-producer"));
    assert_eq!(named.next().unwrap(), None);
}

#[test]
fn transform_rewraps_each_value_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    from_iter(vec![1, 2, 3])
        .transform(move |n| {
            counter.fetch_add(1, SeqCst);
            n * 2
        })
        .assert_yields(2)
        .assert_yields(4)
        .assert_yields(6)
        .assert_exhausted();
    assert_eq!(calls.load(SeqCst), 3);
}

#[test]
fn transform_propagates_failure() {
    let faulty = generate(|mut out| {
        out.yield_(1);
        panic!("source exploded");
    });
    transform(faulty, |n: i32| n + 1)
        .assert_yields(2)
        .assert_fails("source exploded")
        .assert_exhausted();
}

#[test]
fn pair_stops_at_the_shorter_right_side() {
    let pulls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&pulls);
    let left = generate(move |mut out| {
        for n in [1, 2, 3] {
            counter.fetch_add(1, SeqCst);
            out.yield_(n);
        }
    });
    let mut pairs = pair(left, from_iter(vec![4, 5]));
    assert_eq!(pairs.next().unwrap(), Some((1, 4)));
    assert_eq!(pairs.next().unwrap(), Some((2, 5)));
    assert_eq!(pairs.next().unwrap(), None);
    assert_eq!(pairs.next().unwrap(), None);
    // The left side was pulled for its third value in the truncating step
    // and never again afterward.
    assert_eq!(pulls.load(SeqCst), 3);
}

#[test]
fn pair_stops_at_the_shorter_left_side() {
    let pulls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&pulls);
    let right = generate(move |mut out| {
        for n in [4, 5, 6] {
            counter.fetch_add(1, SeqCst);
            out.yield_(n);
        }
    });
    pair(from_iter(vec![1, 2]), right)
        .assert_yields((1, 4))
        .assert_yields((2, 5))
        .assert_exhausted()
        .assert_exhausted();
    // Once the left side was exhausted the right side was not pulled.
    assert_eq!(pulls.load(SeqCst), 2);
}

#[test]
fn pair_propagates_failure_and_exhausts() {
    let faulty = generate(|mut out| {
        out.yield_(1);
        panic!("left exploded");
    });
    pair(faulty, from_iter(vec![10, 20, 30]))
        .assert_yields((1, 10))
        .assert_fails("left exploded")
        .assert_exhausted();
}

#[test]
fn iter_surfaces_values_then_failure_then_end() {
    let faulty = generate(|mut out| {
        out.yield_(1);
        out.yield_(2);
        panic!("exploded");
    });
    let mut items = faulty.iter();
    assert_eq!(items.next(), Some(Ok(1)));
    assert_eq!(items.next(), Some(Ok(2)));
    assert!(matches!(items.next(), Some(Err(_))));
    assert_eq!(items.next(), None);
    assert_eq!(items.next(), None);
}

#[test]
fn iter_collects_into_a_result() {
    let collected = from_iter(vec![1, 2, 3])
        .iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(collected, vec![1, 2, 3]);
}

#[test]
fn pull_works_through_mutable_references_and_boxes() {
    let mut numbers = one_two_three();
    assert_eq!((&mut numbers).next().unwrap(), Some(1));

    let mut boxed: Box<dyn Pull<Item = i32>> = Box::new(numbers);
    assert_eq!(boxed.next().unwrap(), Some(2));
    boxed.close();
    assert_eq!(boxed.next().unwrap(), None);
}
