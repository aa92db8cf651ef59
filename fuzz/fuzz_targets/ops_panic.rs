#![no_main]
use libfuzzer_sys::fuzz_target;
use mathbasics::{parse_operand, Operation};

fuzz_target!(|data: &[u8]| {
    // Split the input into two operands; neither parsing nor any operation may panic.
    let text = String::from_utf8_lossy(data);
    let s: &str = &text;
    let (lhs, rhs) = s.split_once(' ').unwrap_or((s, "0"));
    if let (Ok(a), Ok(b)) = (parse_operand(lhs), parse_operand(rhs)) {
        for op in Operation::ALL {
            let _ = op.apply(a, b);
        }
    }
});
