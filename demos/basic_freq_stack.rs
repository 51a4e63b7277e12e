use nodekit::ds::FreqStack;

fn main() {
    let mut stack = FreqStack::new();
    for value in [5, 7, 5, 7, 4, 5] {
        stack.push(value);
    }
    println!("max frequency: {}", stack.max_frequency());

    let mut order = Vec::new();
    while let Ok(value) = stack.pop() {
        order.push(value);
    }
    // 5, 7, 5, 4, 7, 5
    println!("pop order: {order:?}");
}
