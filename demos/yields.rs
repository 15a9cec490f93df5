// A producer that announces each yield, pulled to exhaustion. Run with
// RUST_LOG=trace to watch the generator lifecycle.

use lazygen::Pull;
use lazygen::generate;

fn main() {
    env_logger::init();

    let my_gen = generate(|mut out| {
        println!("Yielding next number...");
        out.yield_(1);
        println!("Yielding next number...");
        out.yield_(2);
        println!("Yielding next number...");
        out.yield_(3);
    });

    for number in my_gen.iter() {
        println!("Received next number!");
        println!("{}", number.expect("producer failed"));
    }
}
