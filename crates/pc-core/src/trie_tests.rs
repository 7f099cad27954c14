use super::*;

#[test]
fn insert_and_get_round_trip() {
    let mut trie = Trie::new();
    assert!(trie.insert("if", 1).is_none());
    assert_eq!(trie.get("if"), Some(&1));
    assert_eq!(trie.get("ifx"), None);
    assert_eq!(trie.len(), 1);
}

#[test]
fn reinserting_a_key_returns_the_previous_value() {
    let mut trie = Trie::new();
    trie.insert("while", 1);
    assert_eq!(trie.insert("while", 2), Some(1));
    assert_eq!(trie.get("while"), Some(&2));
    assert_eq!(trie.len(), 1);
}

#[test]
fn walker_tracks_prefix_extendability() {
    let mut trie = Trie::new();
    trie.insert("if", 7);
    let mut w = trie.walker();
    assert!(w.step('i'));
    assert_eq!(w.value(), None);
    assert!(w.step('f'));
    assert_eq!(w.value(), Some(&7));
    assert!(!w.step('x'));
    assert_eq!(w.value(), None);
}
