use nfa_min_lib::{
    automaton::{
        AutBuild, Alphabet, Language,
        description::{NfaDescription, UnknownStatePolicy},
        dfa::node::DfaNode,
        nfa::{NFA, NFAEdge},
        state_set::StateSet,
    },
    error::AutomatonError,
    validation::same_language::assert_same_language,
};

fn scenario_1() -> NfaDescription<u32, char> {
    NfaDescription::new(vec![1, 2, 3], 1, vec![3])
        .with_transition(1, 'a', 1)
        .with_transition(1, 'a', 2)
        .with_transition(2, 'b', 3)
        .with_alphabet(vec!['a', 'b'])
}

#[test]
fn test_nfa_to_dfa() {
    let mut nfa = NFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = nfa.add_state(DfaNode::non_accepting(0));
    let q1 = nfa.add_state(DfaNode::non_accepting(1));
    let q2 = nfa.add_state(DfaNode::accepting(2));

    nfa.set_start(q0);

    nfa.add_transition(q0, q0, NFAEdge::Symbol('a'));
    nfa.add_transition(q0, q1, NFAEdge::Symbol('b'));

    nfa.add_transition(q1, q2, NFAEdge::Symbol('a'));
    nfa.add_transition(q2, q1, NFAEdge::Symbol('b'));

    nfa.add_transition(q1, q1, NFAEdge::Symbol('a'));
    nfa.add_transition(q1, q1, NFAEdge::Symbol('b'));

    nfa.add_transition(q2, q2, NFAEdge::Symbol('a'));
    nfa.add_transition(q2, q2, NFAEdge::Symbol('b'));

    let dfa = nfa.determinize().unwrap();

    assert_same_language(&nfa, &dfa, 6);
}

#[test]
fn test_nfa_to_dfa_2() {
    let mut nfa = NFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = nfa.add_state(DfaNode::non_accepting(0));
    let q1 = nfa.add_state(DfaNode::non_accepting(1));
    let q2 = nfa.add_state(DfaNode::accepting(2));

    nfa.set_start(q0);

    nfa.add_transition(q0, q0, NFAEdge::Symbol('a'));
    nfa.add_transition(q0, q0, NFAEdge::Symbol('b'));

    nfa.add_transition(q0, q1, NFAEdge::Symbol('a'));
    nfa.add_transition(q1, q2, NFAEdge::Symbol('b'));

    let dfa = nfa.determinize().unwrap();

    assert_same_language(&nfa, &dfa, 6);
}

#[test]
fn test_nfa_to_dfa_3() {
    // An NFA that has empty transitions
    let mut nfa = NFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = nfa.add_state(DfaNode::non_accepting(0));
    let q1 = nfa.add_state(DfaNode::non_accepting(1));
    let q2 = nfa.add_state(DfaNode::non_accepting(2));
    let q3 = nfa.add_state(DfaNode::non_accepting(3));
    let q4 = nfa.add_state(DfaNode::accepting(4));

    nfa.set_start(q0);

    nfa.add_transition(q0, q1, NFAEdge::Symbol('a'));
    nfa.add_transition(q0, q2, NFAEdge::Epsilon);

    nfa.add_transition(q1, q2, NFAEdge::Symbol('b'));

    nfa.add_transition(q2, q3, NFAEdge::Symbol('a'));
    nfa.add_transition(q2, q4, NFAEdge::Epsilon);

    nfa.add_transition(q3, q2, NFAEdge::Symbol('b'));

    let dfa = nfa.determinize().unwrap();

    assert_same_language(&nfa, &dfa, 6);

    // the start set is the closure of 0
    let start = dfa.get_start().unwrap();
    assert_eq!(dfa.node(start).data, StateSet::new([0, 2, 4]));
    assert!(dfa.is_accepting(start));
}

#[test]
fn test_subset_construction_names() {
    let nfa = NFA::from_description(&scenario_1(), UnknownStatePolicy::Strict).unwrap();
    let dfa = nfa.determinize().unwrap();

    let names = dfa
        .graph
        .node_indices()
        .map(|node| dfa.node(node).data.clone())
        .collect::<Vec<_>>();

    assert_eq!(
        names,
        vec![
            StateSet::new([1]),
            StateSet::new([1, 2]),
            StateSet::new([3]),
            StateSet::empty(),
        ]
    );

    let one = dfa.find_state(&StateSet::new([1])).unwrap();
    let one_two = dfa.find_state(&StateSet::new([1, 2])).unwrap();
    let three = dfa.find_state(&StateSet::new([3])).unwrap();
    let dead = dfa.dead_state().unwrap();

    assert_eq!(dfa.successor(one, &'a'), Some(one_two));
    assert_eq!(dfa.successor(one, &'b'), Some(dead));
    assert_eq!(dfa.successor(one_two, &'a'), Some(one_two));
    assert_eq!(dfa.successor(one_two, &'b'), Some(three));
    assert_eq!(dfa.successor(three, &'a'), Some(dead));
    assert_eq!(dfa.successor(dead, &'b'), Some(dead));

    assert!(dfa.is_accepting(three));
    assert!(!dfa.is_accepting(dead));
    assert!(dfa.node(dead).trap);
    assert_eq!(dfa.node(dead).data.to_string(), "∅");
}

#[test]
fn test_subset_construction_is_total() {
    let nfa = NFA::from_description(&scenario_1(), UnknownStatePolicy::Strict).unwrap();
    let dfa = nfa.determinize().unwrap();

    assert!(dfa.is_complete());
    assert!(dfa.check_complete().is_ok());
    assert_eq!(dfa.graph.edge_count(), dfa.state_count() * dfa.alphabet().len());
}

#[test]
fn test_dead_state_added_when_unreachable() {
    // every move has a successor, the dead state still ends up last
    let description = NfaDescription::new(vec![0], 0, vec![0])
        .with_transition(0, 'a', 0)
        .with_collected_alphabet();

    let dfa = NFA::from_description(&description, UnknownStatePolicy::Strict)
        .unwrap()
        .determinize()
        .unwrap();

    assert_eq!(dfa.state_count(), 2);
    assert_eq!(dfa.dead_state().map(|node| node.index()), Some(1));
    assert_eq!(dfa.reachable_states().len(), 1);
}

#[test]
fn test_empty_alphabet() {
    let description = NfaDescription::<u32, char>::new(vec![0, 1], 0, vec![0]);

    let nfa = NFA::from_description(&description, UnknownStatePolicy::Strict).unwrap();
    let dfa = nfa.determinize().unwrap();

    assert_eq!(dfa.state_count(), 1);
    assert!(dfa.dead_state().is_none());
    assert!(dfa.accepts(&Vec::<char>::new()));
}

#[test]
fn test_epsilon_cycle() {
    let description = NfaDescription::new(vec![0, 1, 2], 0, vec![2])
        .with_epsilon(0, 1)
        .with_epsilon(1, 0)
        .with_transition(1, 'x', 2)
        .with_collected_alphabet();

    let nfa = NFA::from_description(&description, UnknownStatePolicy::Strict).unwrap();
    let dfa = nfa.determinize().unwrap();

    assert_eq!(dfa.node(dfa.get_start().unwrap()).data, StateSet::new([0, 1]));
    assert!(dfa.accepts(&['x']));
    assert!(!dfa.accepts(&['x', 'x']));
    assert_same_language(&nfa, &dfa, 4);
}

#[test]
fn test_unknown_state_strict() {
    let description = scenario_1().with_transition(3, 'a', 4);

    let result = NFA::from_description(&description, UnknownStatePolicy::Strict);
    assert_eq!(result.unwrap_err(), AutomatonError::UnknownState("4".to_string()));

    let description = NfaDescription::new(vec![1], 7, vec![]).with_alphabet(vec!['a']);
    let result = NFA::from_description(&description, UnknownStatePolicy::Strict);
    assert!(matches!(result, Err(AutomatonError::UnknownState(_))));
}

#[test]
fn test_unknown_state_permissive() {
    let description = scenario_1().with_transition(3, 'a', 4);

    let nfa = NFA::from_description(&description, UnknownStatePolicy::Permissive).unwrap();
    let four = nfa.state_index(&4).unwrap();
    assert!(!nfa.is_accepting(four));

    let dfa = nfa.determinize().unwrap();
    assert!(dfa.find_state(&StateSet::new([4])).is_some());
    assert!(dfa.accepts(&['a', 'b']));
    assert!(!dfa.accepts(&['a', 'b', 'a']));
}

#[test]
fn test_unknown_symbol() {
    let description = scenario_1().with_transition(1, 'c', 2);

    let result = NFA::from_description(&description, UnknownStatePolicy::Permissive);
    assert_eq!(result.unwrap_err(), AutomatonError::UnknownSymbol("'c'".to_string()));
}

#[test]
fn test_missing_start() {
    let nfa = NFA::<u32, char>::new(vec!['a']);
    assert_eq!(nfa.determinize().unwrap_err(), AutomatonError::MissingStart);
}

#[test]
#[should_panic]
fn test_duplicate_state() {
    let mut nfa = NFA::<u32, char>::new(vec!['a']);
    nfa.add_state(DfaNode::non_accepting(0));
    nfa.add_state(DfaNode::accepting(0));
}
