use chrono::{TimeZone, Utc};
use shelfapp::collapse::GroupPath;
use shelfapp::config::RenderOptions;
use shelfapp::host::fs::{load_vault, partition_by_folder};
use shelfapp::host::ungrouped;
use shelfapp::view::ShelfView;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn setup() -> TempDir {
    let vault = TempDir::new().unwrap();
    let root = vault.path();
    write(
        root,
        "projects/alpha.md",
        "---\nstatus: done\ntags: [rust, cli]\ndescription: First project\n---\nBody #rust #ideas\n",
    );
    write(
        root,
        "projects/beta.md",
        "---\nstatus: todo\nowner: \"[[people/ana|Ana]]\"\n---\n![[shots/beta.png]]\n",
    );
    write(
        root,
        "journal/today.md",
        "---\nstatus: done\n---\nNothing to see.\n",
    );
    write(root, "loose.md", "No frontmatter at all.\n");
    write(root, ".obsidian/workspace.md", "---\nstatus: hidden\n---\n");
    write(root, "notes.txt", "not markdown\n");
    vault
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
}

#[test]
fn test_vault_grouped_by_status() {
    let vault = setup();
    let entries = load_vault(vault.path()).unwrap();
    assert_eq!(entries.len(), 4);

    let view = ShelfView::new(RenderOptions {
        group_by: Some("note.status".into()),
        ..Default::default()
    });
    let tree = view.render(&ungrouped(&entries), now());

    let labels: Vec<_> = tree.groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels.len(), 3);
    assert!(labels.contains(&"done"));
    assert!(labels.contains(&"todo"));
    assert!(labels.contains(&"None"));
    assert_eq!(tree.total, 4);

    let done = tree.find(&GroupPath::new(false, ["done"])).unwrap();
    assert_eq!(done.count, Some(2));
}

#[test]
fn test_vault_cards() {
    let vault = setup();
    let entries = load_vault(vault.path()).unwrap();
    let view = ShelfView::new(RenderOptions {
        properties: Some(vec!["note.owner".into()]),
        ..Default::default()
    });
    let tree = view.render(&ungrouped(&entries), now());
    let cards = tree.visible_cards();

    let alpha = cards.iter().find(|c| c.title == "alpha").unwrap();
    assert_eq!(alpha.tags, vec!["rust", "cli", "ideas"]);
    assert_eq!(alpha.preview.as_deref(), Some("First project"));

    let beta = cards.iter().find(|c| c.title == "beta").unwrap();
    assert_eq!(beta.thumbnail.as_deref(), Some("shots/beta.png"));
    assert_eq!(beta.properties.len(), 1);
    assert_eq!(beta.properties[0].value, "Ana");
}

#[test]
fn test_folder_native_grouping_with_plugin_level() {
    let vault = setup();
    let entries = load_vault(vault.path()).unwrap();
    let native = partition_by_folder(&entries);

    let mut view = ShelfView::new(RenderOptions {
        group_by: Some("note.status".into()),
        ..Default::default()
    });
    let tree = view.render(&native, now());

    let projects = tree.find(&GroupPath::new(true, ["projects"])).unwrap();
    let statuses: Vec<_> = projects.children.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(statuses, vec!["done", "todo"]);

    // Root-level notes land in the keyless native bucket.
    assert!(tree.find(&GroupPath::native_ungrouped()).is_some());

    let nested = GroupPath::new(true, ["projects", "done"]);
    let tree = view.toggle(&nested, &native, now());
    assert!(tree.find(&nested).unwrap().collapsed);

    let parent = GroupPath::new(true, ["projects"]);
    let tree = view.toggle(&parent, &native, now());
    assert!(tree.find(&nested).is_none());

    let tree = view.toggle(&parent, &native, now());
    assert!(tree.find(&nested).unwrap().collapsed);
}

#[test]
fn test_folder_native_grouping_uses_full_folder_paths() {
    let vault = TempDir::new().unwrap();
    write(vault.path(), "work/notes/a.md", "---\nstatus: done\n---\n");
    write(vault.path(), "home/notes/b.md", "---\nstatus: done\n---\n");
    write(vault.path(), "None/c.md", "---\nstatus: todo\n---\n");
    write(vault.path(), "top.md", "---\nstatus: todo\n---\n");

    let entries = load_vault(vault.path()).unwrap();
    let native = partition_by_folder(&entries);
    let mut view = ShelfView::new(RenderOptions::default());
    let tree = view.render(&native, now());

    let labels: Vec<_> = tree.groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["None", "home/notes", "None", "work/notes"]);

    // A folder literally named "None" and the root bucket toggle independently.
    let folder = GroupPath::new(true, ["None"]);
    let tree = view.toggle(&folder, &native, now());
    assert!(tree.find(&folder).unwrap().collapsed);
    let root = tree.find(&GroupPath::native_ungrouped()).unwrap();
    assert!(!root.collapsed);
    assert_eq!(root.cards[0].title, "top");
}

#[test]
fn test_grouping_by_folder_property() {
    let vault = setup();
    let entries = load_vault(vault.path()).unwrap();
    let view = ShelfView::new(RenderOptions {
        group_by: Some("file.folder".into()),
        ..Default::default()
    });
    let tree = view.render(&ungrouped(&entries), now());
    let root = tree.find(&GroupPath::new(false, ["Root"])).unwrap();
    assert_eq!(root.cards.len(), 1);
    assert_eq!(root.cards[0].title, "loose");
}

#[test]
fn test_malformed_frontmatter_names_file() {
    let vault = TempDir::new().unwrap();
    write(vault.path(), "bad.md", "---\nstatus: [unclosed\n---\n");
    let err = load_vault(vault.path()).unwrap_err();
    assert!(err.to_string().contains("bad.md"));
}
