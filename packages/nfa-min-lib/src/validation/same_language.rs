use itertools::{Itertools, repeat_n};

use crate::automaton::{Language, Letter};

/// All words over the alphabet with a length of at most `max_word_length`,
/// shortest first.
pub fn words_up_to<E: Letter>(alphabet: &[E], max_word_length: usize) -> Vec<Vec<E>> {
    let mut words = vec![vec![]];

    for i in 1..=max_word_length {
        words.extend(
            repeat_n(alphabet, i)
                .multi_cartesian_product()
                .map(|word| word.into_iter().cloned().collect_vec()),
        );
    }

    words
}

/// Checks if two automata accept the same language.
/// This is done by checking if the alphabets are the same and then checking if
/// the automata accept the same words up to a certain length.
pub fn same_language<E: Letter>(
    a: &impl Language<E>,
    b: &impl Language<E>,
    max_word_length: usize,
) -> bool {
    // first we need to check if the alphabets are the same
    if a.alphabet() != b.alphabet() {
        return false;
    }

    words_up_to(a.alphabet(), max_word_length)
        .iter()
        .all(|word| a.accepts(word) == b.accepts(word))
}

pub fn assert_same_language<E: Letter>(
    a: &impl Language<E>,
    b: &impl Language<E>,
    max_word_length: usize,
) {
    // first we need to check if the alphabets are the same
    if a.alphabet() != b.alphabet() {
        panic!("Alphabets are not the same");
    }

    for word in words_up_to(a.alphabet(), max_word_length) {
        match (a.accepts(&word), b.accepts(&word)) {
            (true, false) => {
                panic!(
                    "{:?} is accepted by automaton `a` but not by automaton `b`. Thus their languages are not equal.",
                    word
                );
            }
            (false, true) => {
                panic!(
                    "{:?} is accepted by automaton `b` but not by automaton `a`. Thus their languages are not equal.",
                    word
                );
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::words_up_to;

    #[test]
    fn enumerates_words() {
        let words = words_up_to(&['a', 'b'], 2);
        assert_eq!(words.len(), 7);
        assert_eq!(words[0], Vec::<char>::new());
        assert_eq!(words[1], vec!['a']);
        assert_eq!(words[6], vec!['b', 'b']);
    }

    #[test]
    fn empty_alphabet_has_only_empty_word() {
        let words = words_up_to::<char>(&[], 3);
        assert_eq!(words, vec![Vec::<char>::new()]);
    }
}
