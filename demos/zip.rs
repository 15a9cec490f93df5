// Pairwise combination of two sequences, truncating at the shorter one.

use lazygen::Pull;
use lazygen::from_iter;
use lazygen::pair;

fn main() {
    env_logger::init();

    let x = vec![1, 2, 3];
    let y = vec![4, 5, 6];
    let zipped = pair(from_iter(x), from_iter(y));

    for outcome in zipped.iter() {
        let (a, b) = outcome.expect("producer failed");
        println!("[{a} {b}]");
    }
}
