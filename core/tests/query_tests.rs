use wordindex_core::tokenizer::tokenize_text;
use wordindex_core::{combine, rank, DocumentMatch, InvertedIndex, LineFrequencies, TermPattern};

fn corpus() -> Vec<(String, Vec<Vec<String>>)> {
    vec![
        ("doc1.txt".to_string(), tokenize_text("the cat and the dog\nbird")),
        ("doc2.txt".to_string(), tokenize_text("dog dog\nwhale, world")),
        ("doc3.txt".to_string(), tokenize_text("Cat\nword\ncat cat dog")),
    ]
}

fn ids(matches: &[DocumentMatch]) -> Vec<&str> {
    matches.iter().map(|m| m.document.as_str()).collect()
}

#[test]
fn building_twice_gives_equal_indexes() {
    let mut reversed = corpus();
    reversed.reverse();
    assert_eq!(InvertedIndex::build(corpus()), InvertedIndex::build(reversed));
}

#[test]
fn exact_lookup_reports_literal_counts() {
    let index = InvertedIndex::build(corpus());
    let cat = index.lookup_exact("cat").unwrap();
    assert_eq!(ids(&cat), ["doc1.txt", "doc3.txt"]);
    assert_eq!(cat[1].lines, [(1, 1), (3, 2)].into_iter().collect::<LineFrequencies>());
    assert!(index.lookup_exact("fish").is_none());
}

#[test]
fn conjunction_shrinks_as_terms_are_added() {
    let index = InvertedIndex::build(corpus());
    let dog = index.lookup_all(&["dog"]);
    let cat_dog = index.lookup_all(&["cat", "dog"]);
    let cat_dog_bird = index.lookup_all(&["cat", "dog", "bird"]);
    assert_eq!(ids(&dog), ["doc1.txt", "doc2.txt", "doc3.txt"]);
    assert_eq!(ids(&cat_dog), ["doc1.txt", "doc3.txt"]);
    assert_eq!(ids(&cat_dog_bird), ["doc1.txt"]);
    assert!(index.lookup_all(&["cat", "fish"]).is_empty());

    // doc3: cat on lines 1 and 3 (x2), dog on line 3.
    assert_eq!(cat_dog[1].lines, [(1, 1), (3, 3)].into_iter().collect::<LineFrequencies>());
}

#[test]
fn conjunction_lines_are_the_merge_of_each_term() {
    let index = InvertedIndex::build(corpus());
    let both = index.lookup_all(&["the", "dog"]);
    let the = index.lookup_exact("the").unwrap();
    let dog = index.lookup_exact("dog").unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].lines, combine([&the[0].lines, &dog[0].lines]));
}

#[test]
fn pattern_groups_terms_per_document() {
    let index = InvertedIndex::build(corpus());
    let mut found = index.lookup_pattern("wor.*").unwrap();
    assert_eq!(ids(&found), ["doc2.txt", "doc3.txt"]);
    assert_eq!(found[0].lines.get(2), Some(1));
    assert_eq!(found[1].lines.get(2), Some(1));

    found = index.lookup_pattern("(cat|dog)").unwrap();
    rank(&mut found);
    assert_eq!(ids(&found), ["doc3.txt", "doc1.txt", "doc2.txt"]);
    assert_eq!(found.iter().map(DocumentMatch::score).collect::<Vec<_>>(), [4, 2, 2]);

    assert!(index.lookup_pattern("zebra.*").unwrap().is_empty());
    assert!(index.lookup_pattern("[").is_err());
}

#[test]
fn combine_is_associative_and_order_free() {
    let a: LineFrequencies = [(1, 2), (3, 1)].into_iter().collect();
    let b: LineFrequencies = [(1, 1), (2, 5)].into_iter().collect();
    let c: LineFrequencies = [(2, 1), (4, 7)].into_iter().collect();

    let all_at_once = combine([&a, &b, &c]);
    let left = combine([&combine([&a, &b]), &c]);
    let right = combine([&a, &combine([&b, &c])]);
    let expected: LineFrequencies = [(1, 3), (2, 6), (3, 1), (4, 7)].into_iter().collect();
    assert_eq!(all_at_once, expected);
    assert_eq!(left, all_at_once);
    assert_eq!(right, all_at_once);
    assert_eq!(combine([&c, &a, &b]), all_at_once);
}

#[test]
fn pattern_never_matches_across_words() {
    let pattern = TermPattern::regex("wor.*").unwrap();
    assert!(pattern.matches("world"));
    assert!(!pattern.matches("word world"));
    assert!(!pattern.matches("sworld"));

    // "word world" on one line yields two terms, each matched on its own.
    let index = InvertedIndex::build([("a.txt".to_string(), tokenize_text("word world"))]);
    assert!(index.lookup_exact("word world").is_none());
    let found = index.lookup_pattern("wor.*").unwrap();
    assert_eq!(found[0].lines.get(1), Some(2));
}
