use std::collections::HashSet;

use super::*;

#[test]
fn helpers_keep_their_page_script_names() {
    let paths: Vec<String> = Export::ALL.iter().map(|e| e.path()).collect();
    assert_eq!(
        paths,
        vec![
            "TaskManager.showToast",
            "TaskManager.formatDate",
            "TaskManager.debounce",
            "TaskManager.Storage.get",
            "TaskManager.Storage.set",
            "TaskManager.Storage.remove",
        ]
    );
}

#[test]
fn every_path_is_unique() {
    let paths: HashSet<String> = Export::ALL.iter().map(|e| e.path()).collect();
    assert_eq!(paths.len(), Export::ALL.len());
}
