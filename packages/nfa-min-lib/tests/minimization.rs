use nfa_min_lib::{
    automaton::{
        AutBuild,
        description::{NfaDescription, UnknownStatePolicy},
        dfa::{
            DFA,
            minimization::{MinimizationAlgorithm, refine},
            node::DfaNode,
            partition::Partition,
        },
        nfa::NFA,
        state_set::StateSet,
    },
    validation::{
        isomorphism::is_isomorphic,
        same_language::{assert_same_language, same_language},
    },
};

const ALGORITHMS: [MinimizationAlgorithm; 2] = [
    MinimizationAlgorithm::TableFilling,
    MinimizationAlgorithm::Hopcroft,
];

#[test]
fn minimize_1() {
    let mut dfa = DFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = dfa.add_state(DfaNode::non_accepting(0));
    let q1 = dfa.add_state(DfaNode::non_accepting(1));
    let q2 = dfa.add_state(DfaNode::non_accepting(2));
    let q3 = dfa.add_state(DfaNode::accepting(3));
    let q4 = dfa.add_state(DfaNode::non_accepting(4));
    let q5 = dfa.add_state(DfaNode::accepting(5));
    dfa.set_start(q0);

    dfa.add_transition(q0, q1, 'a');
    dfa.add_transition(q0, q3, 'b');
    dfa.add_transition(q1, q0, 'a');
    dfa.add_transition(q1, q3, 'b');
    dfa.add_transition(q2, q1, 'a');
    dfa.add_transition(q2, q4, 'b');
    dfa.add_transition(q3, q5, 'a');
    dfa.add_transition(q3, q5, 'b');
    dfa.add_transition(q4, q3, 'a');
    dfa.add_transition(q4, q3, 'b');
    dfa.add_transition(q5, q5, 'a');
    dfa.add_transition(q5, q5, 'b');

    dfa.override_complete();

    let minimized = dfa.minimize().unwrap();

    assert!(same_language(&dfa, &minimized, 10));
    // q2 and q4 are unreachable but still distinguishable, so they stay
    assert_eq!(minimized.state_count(), 4);
    assert_eq!(minimized.reachable_states().len(), 2);
    assert!(minimized.find_state(&StateSet::new([0, 1])).is_some());
    assert!(minimized.find_state(&StateSet::new([3, 5])).is_some());
}

#[test]
fn minimize_2() {
    // example:  https://en.wikipedia.org/wiki/DFA_minimization
    let mut dfa = DFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = dfa.add_state(DfaNode::non_accepting(0));
    let q1 = dfa.add_state(DfaNode::non_accepting(1));
    let q2 = dfa.add_state(DfaNode::accepting(2));
    let q3 = dfa.add_state(DfaNode::accepting(3));
    let q4 = dfa.add_state(DfaNode::accepting(4));
    let q5 = dfa.add_state(DfaNode::non_accepting(5));
    dfa.set_start(q0);

    dfa.add_transition(q0, q1, 'a');
    dfa.add_transition(q0, q2, 'b');
    dfa.add_transition(q1, q0, 'a');
    dfa.add_transition(q1, q3, 'b');
    dfa.add_transition(q2, q4, 'a');
    dfa.add_transition(q2, q5, 'b');
    dfa.add_transition(q3, q4, 'a');
    dfa.add_transition(q3, q5, 'b');
    dfa.add_transition(q4, q4, 'a');
    dfa.add_transition(q4, q5, 'b');
    dfa.add_transition(q5, q5, 'a');
    dfa.add_transition(q5, q5, 'b');

    dfa.override_complete();

    for algorithm in ALGORITHMS {
        let minimized = dfa.minimize_with(algorithm).unwrap();

        assert!(same_language(&dfa, &minimized, 10));
        assert_eq!(minimized.state_count(), 3);

        let sink = minimized.find_state(&StateSet::new([5])).unwrap();
        assert!(minimized.node(sink).trap);
    }

    let classes = dfa
        .equivalence_classes(MinimizationAlgorithm::TableFilling)
        .unwrap();
    assert_eq!(
        classes,
        vec![
            StateSet::new([0, 1]),
            StateSet::new([2, 3, 4]),
            StateSet::new([5]),
        ]
    );
}

#[test]
fn minimize_3() {
    let mut dfa = DFA::<u32, char>::new(vec!['a']);

    let q0 = dfa.add_state(DfaNode::accepting(0));
    let q1 = dfa.add_state(DfaNode::non_accepting(1));
    let q2 = dfa.add_state(DfaNode::accepting(2));
    let q3 = dfa.add_state(DfaNode::non_accepting(3));

    dfa.set_start(q0);

    dfa.add_transition(q0, q1, 'a');
    dfa.add_transition(q1, q2, 'a');
    dfa.add_transition(q2, q3, 'a');
    dfa.add_transition(q3, q0, 'a');

    dfa.override_complete();

    let minimized = dfa.minimize().unwrap();

    assert!(same_language(&dfa, &minimized, 10));
    assert_eq!(minimized.state_count(), 2);
}

#[test]
fn minimize_4() {
    let mut dfa = DFA::<u32, char>::new(vec!['a', 'b', 'c', 'd']);

    let q0 = dfa.add_state(DfaNode::non_accepting(0));
    let q1 = dfa.add_state(DfaNode::accepting(1));
    let q2 = dfa.add_state(DfaNode::non_accepting(2));

    dfa.set_start(q0);

    dfa.add_transition(q0, q0, 'a');
    dfa.add_transition(q0, q1, 'b');
    dfa.add_transition(q0, q2, 'c');
    dfa.add_transition(q0, q2, 'd');
    dfa.add_transition(q1, q2, 'a');
    dfa.add_transition(q1, q2, 'b');
    dfa.add_transition(q1, q1, 'c');
    dfa.add_transition(q1, q2, 'd');
    dfa.add_transition(q2, q2, 'a');
    dfa.add_transition(q2, q2, 'b');
    dfa.add_transition(q2, q2, 'c');
    dfa.add_transition(q2, q2, 'd');

    dfa.override_complete();

    let minimized = dfa.minimize().unwrap();

    assert!(same_language(&dfa, &minimized, 8));
    assert_eq!(minimized.state_count(), 3);
}

#[test]
fn minimize_5() {
    let mut dfa = DFA::<u32, i32>::new(vec![1, 2, -1, -2]);

    let q0 = dfa.add_state(DfaNode::non_accepting(0));
    let q1 = dfa.add_state(DfaNode::non_accepting(1));
    let q2 = dfa.add_state(DfaNode::non_accepting(2));
    let q3 = dfa.add_state(DfaNode::non_accepting(3));
    let q4 = dfa.add_state(DfaNode::non_accepting(4));
    let q5 = dfa.add_state(DfaNode::accepting(5));
    let q6 = dfa.add_state(DfaNode::non_accepting(6));
    let q7 = dfa.add_state(DfaNode::non_accepting(7));
    let q8 = dfa.add_state(DfaNode::non_accepting(8));

    dfa.set_start(q0);

    dfa.add_transition(q0, q1, -2);
    dfa.add_transition(q0, q2, -1);
    dfa.add_transition(q0, q3, 1);
    dfa.add_transition(q0, q1, 2);

    dfa.add_transition(q1, q1, -2);
    dfa.add_transition(q1, q1, -1);
    dfa.add_transition(q1, q3, 1);
    dfa.add_transition(q1, q1, 2);

    dfa.add_transition(q2, q2, -2);
    dfa.add_transition(q2, q2, -1);
    dfa.add_transition(q2, q6, 1);
    dfa.add_transition(q2, q2, 2);

    dfa.add_transition(q3, q1, -2);
    dfa.add_transition(q3, q4, -1);
    dfa.add_transition(q3, q3, 1);
    dfa.add_transition(q3, q1, 2);

    dfa.add_transition(q4, q1, -2);
    dfa.add_transition(q4, q5, -1);
    dfa.add_transition(q4, q1, 1);
    dfa.add_transition(q4, q1, 2);

    dfa.add_transition(q5, q1, -2);
    dfa.add_transition(q5, q5, -1);
    dfa.add_transition(q5, q1, 1);
    dfa.add_transition(q5, q1, 2);

    dfa.add_transition(q6, q2, -2);
    dfa.add_transition(q6, q7, -1);
    dfa.add_transition(q6, q6, 1);
    dfa.add_transition(q6, q2, 2);

    dfa.add_transition(q7, q2, -2);
    dfa.add_transition(q7, q8, -1);
    dfa.add_transition(q7, q2, 1);
    dfa.add_transition(q7, q2, 2);

    dfa.add_transition(q8, q2, -2);
    dfa.add_transition(q8, q8, -1);
    dfa.add_transition(q8, q2, 1);
    dfa.add_transition(q8, q2, 2);

    dfa.override_complete();

    for algorithm in ALGORITHMS {
        let minimized = dfa.minimize_with(algorithm).unwrap();

        assert_eq!(minimized.state_count(), 6);

        // q2, q6, q7 and q8 can never reach q5
        let sink = minimized
            .find_state(&StateSet::new([2, 6, 7, 8]))
            .unwrap();
        assert!(minimized.node(sink).trap);

        assert_same_language(&dfa, &minimized, 8);
    }
}

fn scenario_1() -> DFA<StateSet<u32>, char> {
    let description = NfaDescription::new(vec![1, 2, 3], 1, vec![3])
        .with_transition(1, 'a', 1)
        .with_transition(1, 'a', 2)
        .with_transition(2, 'b', 3)
        .with_alphabet(vec!['a', 'b']);

    NFA::from_description(&description, UnknownStatePolicy::Strict)
        .unwrap()
        .determinize()
        .unwrap()
}

#[test]
fn minimize_subset_construction() {
    let dfa = scenario_1();
    assert_eq!(dfa.state_count(), 4);

    for algorithm in ALGORITHMS {
        let partition = refine(&dfa, algorithm).unwrap();
        assert!(partition.is_identity());

        let minimized = dfa.minimize_with(algorithm).unwrap();
        assert_eq!(minimized.state_count(), 4);
        assert!(minimized.find_state(&StateSet::new([StateSet::empty()])).is_some());
        assert_same_language(&dfa, &minimized, 6);
    }
}

#[test]
fn minimize_all_accepting_loop() {
    let description = NfaDescription::new(vec!["p", "q"], "p", vec!["p", "q"])
        .with_transition("p", 'a', "p")
        .with_transition("p", 'a', "q")
        .with_transition("q", 'a', "q")
        .with_collected_alphabet();

    let dfa = NFA::from_description(&description, UnknownStatePolicy::Strict)
        .unwrap()
        .determinize()
        .unwrap();

    // {p}, {p,q} and the unreachable dead state
    assert_eq!(dfa.state_count(), 3);

    let partition = refine(&dfa, MinimizationAlgorithm::TableFilling).unwrap();
    assert_eq!(partition.len(), 2);

    let minimized = dfa.minimize().unwrap();
    assert_eq!(minimized.state_count(), 2);
    let accepting = minimized
        .find_state(&StateSet::new([StateSet::new(["p"]), StateSet::new(["p", "q"])]))
        .unwrap();
    assert!(minimized.is_accepting(accepting));
    assert_eq!(minimized.get_start(), Some(accepting));
}

#[test]
fn minimal_dfa_is_fixed_point() {
    let dfa = scenario_1();
    let minimized = dfa.minimize().unwrap();

    let partition = refine(&minimized, MinimizationAlgorithm::TableFilling).unwrap();
    assert_eq!(partition, Partition::identity(minimized.state_count()));

    let twice = minimized.minimize().unwrap();
    assert!(is_isomorphic(&minimized, &twice));
    assert_same_language(&minimized, &twice, 6);
}

#[test]
fn single_state_dfa() {
    let mut dfa = DFA::<u32, char>::new(vec!['a']);
    let q0 = dfa.add_state(DfaNode::non_accepting(0));
    dfa.set_start(q0);
    dfa.add_transition(q0, q0, 'a');

    for algorithm in ALGORITHMS {
        let minimized = dfa.minimize_with(algorithm).unwrap();
        assert_eq!(minimized.state_count(), 1);
        assert!(minimized.node(minimized.get_start().unwrap()).trap);
    }
}
