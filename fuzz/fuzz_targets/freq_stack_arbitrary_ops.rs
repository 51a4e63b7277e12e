#![no_main]

use libfuzzer_sys::fuzz_target;
use nodekit::ds::FreqStack;
use nodekit::error::StackError;

// Fuzz arbitrary push/pop/clear sequences on FreqStack
fuzz_target!(|data: &[u8]| {
    let mut stack: FreqStack<u8> = FreqStack::new();
    let mut held = 0usize;

    for chunk in data.chunks_exact(2) {
        let value = chunk[1] % 16;
        match chunk[0] % 4 {
            0 | 1 => {
                let before = stack.frequency(&value);
                stack.push(value);
                held += 1;
                assert_eq!(stack.frequency(&value), before + 1);
                assert!(stack.max_frequency() >= before + 1);
            }
            2 => {
                let max_before = stack.max_frequency();
                let expected = stack.peek().copied();
                match stack.pop() {
                    Ok(popped) => {
                        held -= 1;
                        assert_eq!(Some(popped), expected);
                        assert_eq!(stack.frequency(&popped) + 1, max_before);
                    }
                    Err(err) => {
                        assert_eq!(err, StackError::EmptyStack);
                        assert_eq!(held, 0);
                    }
                }
            }
            3 => {
                stack.clear();
                held = 0;
                assert_eq!(stack.max_frequency(), 0);
            }
            _ => unreachable!(),
        }

        assert_eq!(stack.len(), held);
        assert!(stack.check_invariants().is_ok());
    }
});
