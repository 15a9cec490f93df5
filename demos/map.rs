// Element transformation: a generator over a list, re-wrapped value by
// value through `increment`.

use lazygen::Pull;
use lazygen::from_iter;

fn increment(n: i32) -> i32 {
    n + 1
}

fn main() {
    env_logger::init();

    let a = vec![1, 2, 3];
    let b = from_iter(a).transform(increment);

    for value in b.iter() {
        println!("{}", value.expect("producer failed"));
    }
}
