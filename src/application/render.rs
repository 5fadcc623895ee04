use colored::Colorize;

use filetree::tree::{Children, FileTree, FolderId, NodeId, SortEntry};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// Draws a tree as indented text, folders before files. Children of
/// collapsed folders are left out.
pub struct Renderer {
    colors: bool,
}

impl Renderer {
    pub fn new(colors: bool) -> Self {
        Self { colors }
    }

    pub fn render(&self, tree: &FileTree) -> String {
        let root = tree.root();
        let mut out = self.label(tree, root.node());
        out.push('\n');
        self.render_children(tree, root, "", &mut out);
        out
    }

    fn render_children(&self, tree: &FileTree, folder: FolderId, indent: &str, out: &mut String) {
        if !tree.is_expanded(folder).unwrap_or(false) {
            return;
        }
        let children = self.ordered(tree, folder);
        let count = children.len();
        for (position, child) in children.iter().enumerate() {
            let last = position + 1 == count;
            let branch = if last { LAST_BRANCH } else { BRANCH };
            out.push_str(&format!("{indent}{branch}{}\n", self.label(tree, child)));
            if let Some(child_folder) = tree.as_folder(child) {
                let next = format!("{indent}{}", if last { BLANK } else { PIPE });
                self.render_children(tree, child_folder, &next, out);
            }
        }
    }

    fn ordered(&self, tree: &FileTree, folder: FolderId) -> Children {
        let mut children = tree.children(folder).cloned().unwrap_or_default();
        children.sort(|id| {
            tree.node(id).map(|node| SortEntry {
                kind: node.kind(),
                name: node.name(),
            })
        });
        children
    }

    fn label(&self, tree: &FileTree, id: NodeId) -> String {
        let Some(node) = tree.node(id) else {
            return String::new();
        };
        let is_root = tree.root() == id;
        let mut label = if is_root {
            self.paint(node.name().to_string(), |s| s.bold().to_string())
        } else if node.is_folder() {
            let name = format!("{}{}", node.name(), tree.config().separator);
            self.paint(name, |s| s.blue().bold().to_string())
        } else {
            node.name().to_string()
        };

        if !is_root {
            let hidden = node.as_folder().map_or(0, |data| {
                if data.is_expanded() { 0 } else { data.children().len() }
            });
            if hidden > 0 {
                label.push_str(&self.paint(format!(" [{hidden} hidden]"), |s| s.dimmed().to_string()));
            }
        }

        let mut markers = Vec::new();
        if node.is_selected() {
            markers.push(self.paint("[selected]".to_string(), |s| s.green().to_string()));
        }
        if let Some(file) = node.as_file() {
            if file.is_opened() {
                markers.push(self.paint("[opened]".to_string(), |s| s.cyan().to_string()));
            }
            if file.is_focused() {
                markers.push(self.paint("[focused]".to_string(), |s| s.yellow().to_string()));
            }
        }
        for marker in markers {
            label.push(' ');
            label.push_str(&marker);
        }
        label
    }

    fn paint(&self, text: String, style: impl Fn(&str) -> String) -> String {
        if self.colors { style(&text) } else { text }
    }
}
