use proptest::prelude::*;
use turing_increment::{
    incrementer, Halt, Recorder, TuringMachine, TuringMachineError, MAX_EXECUTION_STEPS,
};

const SYMBOL_POOL: &str = "0123456789abcdefghijklmnopqrstuvwxyzXYZ";

/// An alphabet of 2..=12 distinct symbols together with a numeral written in it, as digit
/// ranks, most significant first.
fn alphabet_and_digits() -> impl Strategy<Value = (Vec<char>, Vec<usize>)> {
    proptest::sample::subsequence(SYMBOL_POOL.chars().collect::<Vec<_>>(), 2..=12)
        .prop_flat_map(|alphabet| {
            let base = alphabet.len();
            (Just(alphabet), proptest::collection::vec(0..base, 0..48))
        })
}

/// Schoolbook increment on digit ranks.
fn reference_increment(digits: &[usize], base: usize) -> Vec<usize> {
    let mut result = digits.to_vec();
    for digit in result.iter_mut().rev() {
        if *digit + 1 < base {
            *digit += 1;
            return result;
        }
        *digit = 0;
    }
    result.insert(0, 1);
    result
}

fn render(alphabet: &[char], digits: &[usize]) -> String {
    digits.iter().map(|&d| alphabet[d]).collect()
}

fn run(alphabet: &[char], input: &str) -> (Halt, String, usize) {
    let alphabet: String = alphabet.iter().collect();
    let mut machine = TuringMachine::new(incrementer(&alphabet).expect("alphabet is valid"));
    let halt = machine.execute(input);
    (halt, machine.tape().contents(), machine.step_count())
}

proptest! {
    #[test]
    fn increments_like_positional_arithmetic((alphabet, digits) in alphabet_and_digits()) {
        let input = render(&alphabet, &digits);
        let expected = render(&alphabet, &reference_increment(&digits, alphabet.len()));

        let (halt, tape, steps) = run(&alphabet, &input);

        prop_assert_eq!(halt, Halt::Accept);
        prop_assert_eq!(tape, expected);
        prop_assert!(steps <= 2 * digits.len() + 3, "took {} steps", steps);
    }

    #[test]
    fn overflow_grows_width_by_one(
        alphabet in proptest::sample::subsequence(SYMBOL_POOL.chars().collect::<Vec<_>>(), 2..=12),
        width in 1usize..40,
    ) {
        let last = alphabet[alphabet.len() - 1];
        let input: String = std::iter::repeat(last).take(width).collect();
        let expected: String = std::iter::once(alphabet[1])
            .chain(std::iter::repeat(alphabet[0]).take(width))
            .collect();

        let (halt, tape, _) = run(&alphabet, &input);

        prop_assert_eq!(halt, Halt::Accept);
        prop_assert_eq!(tape.chars().count(), width + 1);
        prop_assert_eq!(tape, expected);
    }

    #[test]
    fn no_carry_changes_only_last_digit((alphabet, digits) in alphabet_and_digits()) {
        let base = alphabet.len();
        let mut digits = digits;
        let last = digits.pop().unwrap_or(0) % (base - 1);
        digits.push(last);

        let input = render(&alphabet, &digits);
        let (_, tape, _) = run(&alphabet, &input);

        let mut expected = input.clone();
        expected.pop();
        expected.push(alphabet[last + 1]);
        prop_assert_eq!(tape, expected);
    }

    #[test]
    fn validate_rejects_blank_and_foreign_symbols(
        (alphabet, digits) in alphabet_and_digits(),
        position in 0usize..48,
        foreign in prop_oneof![Just('_'), Just('!'), Just(' '), Just('é')],
    ) {
        let alphabet_text: String = alphabet.iter().collect();
        let machine = TuringMachine::new(incrementer(&alphabet_text).unwrap());

        let mut input: Vec<char> = render(&alphabet, &digits).chars().collect();
        input.insert(position.min(input.len()), foreign);
        let input: String = input.into_iter().collect();

        prop_assert_eq!(
            machine.validate(&input),
            Err(TuringMachineError::InvalidSymbol(foreign))
        );
    }

    #[test]
    fn generation_is_deterministic((alphabet, digits) in alphabet_and_digits()) {
        let alphabet_text: String = alphabet.iter().collect();
        let input = render(&alphabet, &digits);

        let mut first = TuringMachine::new(incrementer(&alphabet_text).unwrap());
        let mut second = TuringMachine::new(incrementer(&alphabet_text).unwrap());
        let mut first_trace = Recorder::new();
        let mut second_trace = Recorder::new();

        prop_assert_eq!(first.description(), second.description());
        prop_assert_eq!(
            first.execute_with(&input, &mut first_trace),
            second.execute_with(&input, &mut second_trace)
        );
        prop_assert_eq!(first_trace.events(), second_trace.events());
        prop_assert_eq!(first.tape(), second.tape());
    }
}

#[test]
fn generator_rejects_short_alphabets() {
    for alphabet in ["", "0", "x"] {
        assert!(matches!(
            incrementer(alphabet),
            Err(TuringMachineError::InvalidAlphabet(_))
        ));
    }
    assert!(incrementer("01").is_ok());
}

#[test]
fn one_machine_runs_many_inputs() {
    let mut machine = TuringMachine::new(incrementer("0123456789").unwrap());

    let results: Vec<(bool, String)> = ["199", "9", "", "0", "4x2", "41"]
        .iter()
        .map(|input| {
            let accepted = machine.run(input);
            (accepted, machine.tape().contents())
        })
        .collect();

    assert_eq!(
        results,
        vec![
            (true, "200".to_string()),
            (true, "10".to_string()),
            (true, "1".to_string()),
            (true, "1".to_string()),
            // Rejected before touching the tape of the previous run.
            (false, "1".to_string()),
            (true, "42".to_string()),
        ]
    );
}

#[test]
fn long_numerals_hit_the_step_ceiling() {
    let input = "9".repeat(MAX_EXECUTION_STEPS);
    let mut machine = TuringMachine::new(incrementer("0123456789").unwrap());

    assert_eq!(
        machine.execute(&input),
        Halt::Err(TuringMachineError::StepLimitExceeded(MAX_EXECUTION_STEPS))
    );
    assert_eq!(machine.state(), "q_reject");

    let mut machine = machine.with_step_limit(4 * MAX_EXECUTION_STEPS);
    assert!(machine.run(&input));
    assert_eq!(machine.tape().contents().len(), MAX_EXECUTION_STEPS + 1);
}
