//! Tree rendering for bone hierarchies

use console::Style;
use skelanim::Rig;

/// Represents a node in a tree structure
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    pub node_type: NodeType,
    pub children: Vec<TreeNode>,
    pub metadata: Vec<(String, String)>,
}

/// Types of nodes in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Rig,
    RootBone,
    Bone,
    SkinPart,
}

/// Options for tree rendering
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    pub max_depth: Option<usize>,
    pub no_color: bool,
    pub show_metadata: bool,
}

impl TreeNode {
    /// Create a new tree node
    pub fn new(name: String, node_type: NodeType) -> Self {
        Self {
            name,
            node_type,
            children: Vec::new(),
            metadata: Vec::new(),
        }
    }

    /// Add a child node
    pub fn add_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.push((key.to_string(), value.to_string()));
        self
    }
}

impl NodeType {
    /// Get icon for node type
    pub fn icon(self) -> &'static str {
        match self {
            NodeType::Rig => "🦴",
            NodeType::RootBone => "◉",
            NodeType::Bone => "○",
            NodeType::SkinPart => "▭",
        }
    }

    /// Get color style for node type
    pub fn style(self, no_color: bool) -> Style {
        if no_color {
            Style::new()
        } else {
            match self {
                NodeType::Rig => Style::new().bold().cyan(),
                NodeType::RootBone => Style::new().bold().yellow(),
                NodeType::Bone => Style::new().green(),
                NodeType::SkinPart => Style::new().dim(),
            }
        }
    }
}

/// Build the hierarchy tree of a rig: bones nested under their parents, skin
/// parts listed under the bone they are bound to
pub fn rig_tree(rig: &Rig) -> TreeNode {
    let skeleton = rig.skeleton();
    let animation = rig.animation();

    let mut root = TreeNode::new(rig.name().to_string(), NodeType::Rig)
        .with_metadata("bones", &skeleton.bone_count().to_string())
        .with_metadata("keyframes", &animation.key_count().to_string());

    for bone in skeleton.roots() {
        root = root.add_child(bone_node(rig, bone));
    }
    root
}

fn bone_node(rig: &Rig, index: usize) -> TreeNode {
    let skeleton = rig.skeleton();
    let name = skeleton
        .bone(index)
        .and_then(|b| b.name.clone())
        .unwrap_or_else(|| format!("bone_{index}"));
    let node_type = if skeleton.is_root(index) {
        NodeType::RootBone
    } else {
        NodeType::Bone
    };

    let mut node = TreeNode::new(format!("{name} [{index}]"), node_type);
    if let Some(bind) = skeleton.bind_to_root(index) {
        let origin = bind.transform_point3(glam::Vec3::ZERO);
        node = node.with_metadata(
            "bind origin",
            &format!("({:.3}, {:.3}, {:.3})", origin.x, origin.y, origin.z),
        );
    }

    for part in rig.skin().parts().iter().filter(|p| p.bone == index) {
        node = node.add_child(TreeNode::new(part.mesh_name.clone(), NodeType::SkinPart));
    }
    for child in skeleton.children(index) {
        node = node.add_child(bone_node(rig, child));
    }
    node
}

/// Render a tree structure to string
pub fn render_tree(root: &TreeNode, options: &TreeOptions) -> String {
    let mut output = String::new();
    render_node(root, &mut output, "", true, 0, options);
    output
}

/// Render a single node and its children
fn render_node(
    node: &TreeNode,
    output: &mut String,
    prefix: &str,
    is_last: bool,
    depth: usize,
    options: &TreeOptions,
) {
    if let Some(max_depth) = options.max_depth
        && depth > max_depth
    {
        return;
    }

    let icon = node.node_type.icon();
    let style = node.node_type.style(options.no_color);
    let connector = if depth == 0 {
        ""
    } else if is_last {
        "└── "
    } else {
        "├── "
    };

    output.push_str(&format!(
        "{}{}{} {}\n",
        prefix,
        connector,
        icon,
        style.apply_to(&node.name)
    ));

    let child_prefix = if depth == 0 {
        String::new()
    } else {
        format!("{}{}", prefix, if is_last { "    " } else { "│   " })
    };

    if options.show_metadata {
        let meta_style = if options.no_color {
            Style::new()
        } else {
            Style::new().dim()
        };
        for (key, value) in &node.metadata {
            output.push_str(&format!(
                "{}    {}: {}\n",
                child_prefix,
                meta_style.apply_to(key),
                value
            ));
        }
    }

    for (i, child) in node.children.iter().enumerate() {
        let is_last_child = i == node.children.len() - 1;
        render_node(child, output, &child_prefix, is_last_child, depth + 1, options);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rig_tree_structure() {
        let rig = skelanim::demo::arm_rig().unwrap();
        let tree = rig_tree(&rig);

        assert_eq!(tree.children.len(), 1);
        let root_bone = &tree.children[0];
        assert_eq!(root_bone.node_type, NodeType::RootBone);
        // One skin part plus the two arms
        assert_eq!(root_bone.children.len(), 3);
        assert_eq!(root_bone.children[0].node_type, NodeType::SkinPart);
    }

    #[test]
    fn test_tree_rendering() {
        let rig = skelanim::demo::arm_rig().unwrap();
        let options = TreeOptions {
            no_color: true,
            show_metadata: true,
            ..Default::default()
        };
        let output = render_tree(&rig_tree(&rig), &options);

        assert!(output.contains("arm"));
        assert!(output.contains("root [0]"));
        assert!(output.contains("└── ○ right_hand [4]"));
        assert!(output.contains("bind origin: (1.000, 1.000, 0.000)"));
    }

    #[test]
    fn test_tree_depth_limit() {
        let rig = skelanim::demo::arm_rig().unwrap();
        let options = TreeOptions {
            max_depth: Some(1),
            no_color: true,
            show_metadata: false,
        };
        let output = render_tree(&rig_tree(&rig), &options);

        assert!(output.contains("root [0]"));
        assert!(!output.contains("left_arm"));
    }
}
