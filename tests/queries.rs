use annotable::construct::Options;
use annotable::registry::Annotator;

// Seeds a record of three methods:
//   load  [traced, cached]
//   save  [traced]
//   purge [deprecated]
fn setup() -> Annotator {
    let mut annotator = Annotator::new();
    annotator
        .declare(&["traced", "cached", "deprecated"])
        .expect("declaration ok");
    for (method, tags) in [
        ("load", vec!["traced", "cached"]),
        ("save", vec!["traced"]),
        ("purge", vec!["deprecated"]),
    ] {
        for tag in tags {
            annotator
                .invoke(tag, Vec::new(), Options::default())
                .expect("invoke ok");
        }
        annotator.on_method_defined(method);
    }
    annotator
}

#[test]
fn no_filter_returns_the_full_record() {
    let annotator = setup();
    let names: Vec<&str> = annotator
        .annotated_methods(&[])
        .iter()
        .map(|m| m.name())
        .collect();
    assert_eq!(names, vec!["load", "save", "purge"]);
}

#[test]
fn filter_keeps_storage_order() {
    let annotator = setup();
    let names: Vec<&str> = annotator
        .annotated_methods(&["traced"])
        .iter()
        .map(|m| m.name())
        .collect();
    assert_eq!(names, vec!["load", "save"]);
}

#[test]
fn filter_matches_any_of_the_given_names() {
    let annotator = setup();
    let names: Vec<&str> = annotator
        .annotated_methods(&["cached", "deprecated"])
        .iter()
        .map(|m| m.name())
        .collect();
    assert_eq!(names, vec!["load", "purge"]);
}

#[test]
fn filter_without_matches_is_empty() {
    let annotator = setup();
    assert!(annotator.annotated_methods(&["memoized"]).is_empty());
}

#[test]
fn existence_follows_the_record() {
    let annotator = setup();
    assert!(annotator.annotated_method_exists("save"));
    assert!(!annotator.annotated_method_exists("drop"));

    let empty = Annotator::new();
    assert!(!empty.annotated_method_exists("save"));
}

#[test]
fn annotation_existence_per_method() {
    let annotator = setup();
    let methods = annotator.annotated_methods(&[]);
    let load = methods.iter().find(|m| m.name() == "load").unwrap();
    assert!(load.annotation_exists("cached"));
    assert!(!load.annotation_exists("deprecated"));
}

#[test]
fn selection_preserves_storage_order_not_query_order() {
    let annotator = setup();
    let methods = annotator.annotated_methods(&[]);
    let load = methods.iter().find(|m| m.name() == "load").unwrap();
    // query order reversed on purpose
    let selected = load
        .select_annotations(&["cached", "traced"])
        .expect("selection ok");
    let names: Vec<&str> = selected.iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["traced", "cached"]);
}

#[test]
fn selection_without_matches_is_empty() {
    let annotator = setup();
    let methods = annotator.annotated_methods(&[]);
    let save = methods.iter().find(|m| m.name() == "save").unwrap();
    let selected = save
        .select_annotations(&["deprecated"])
        .expect("selection ok");
    assert!(selected.is_empty());
}

#[test]
fn find_returns_first_match_in_storage_order() {
    let annotator = setup();
    let methods = annotator.annotated_methods(&[]);
    let load = methods.iter().find(|m| m.name() == "load").unwrap();
    let found = load
        .find_annotation(&["cached", "traced"])
        .expect("find ok")
        .expect("a match exists");
    assert_eq!(found.name(), "traced");
    let missing = load.find_annotation(&["deprecated"]).expect("find ok");
    assert!(missing.is_none());
}
