//! Physical and logical model trees

use super::types::TypeMapper;
use crate::models::{LogicalModel, MetaNode, MetaNodeKind, TreeNode};
use serde_json::json;

/// Two-level table/column browsing tree from raw catalog metadata.
///
/// Table nodes are branches; each column becomes a leaf labelled with its
/// abstract type, mapped through the dialect's type mapper.
pub fn schema_tree(root: &MetaNode, mapper: &dyn TypeMapper) -> TreeNode {
    let mut tables = Vec::new();
    collect_tables(root, mapper, &mut tables);
    TreeNode::branch(&root.name)
        .with_icon("schema")
        .with_children(tables)
        .expanded()
}

/// Some catalogs nest tables under intermediate schema nodes; the output
/// stays two-level, so those are flattened away.
fn collect_tables(node: &MetaNode, mapper: &dyn TypeMapper, out: &mut Vec<TreeNode>) {
    for child in &node.children {
        match child.kind {
            MetaNodeKind::Table | MetaNodeKind::View => out.push(table_node(child, mapper)),
            MetaNodeKind::Schema => collect_tables(child, mapper, out),
            MetaNodeKind::Root | MetaNodeKind::Column => {}
        }
    }
}

fn table_node(table: &MetaNode, mapper: &dyn TypeMapper) -> TreeNode {
    let icon = match table.kind {
        MetaNodeKind::View => "view",
        _ => "table",
    };
    let columns = table
        .children
        .iter()
        .filter(|child| child.kind == MetaNodeKind::Column)
        .map(|column| column_node(&table.name, column, mapper))
        .collect();
    TreeNode::branch(&table.name)
        .with_icon(icon)
        .with_children(columns)
}

fn column_node(table_name: &str, column: &MetaNode, mapper: &dyn TypeMapper) -> TreeNode {
    let abstract_type = mapper.map(column.sql_type);
    let icon = if column.primary_key { "key" } else { "column" };
    TreeNode::leaf(format!("{} : {}", column.name, abstract_type.as_str()))
        .with_icon(icon)
        .with_payload(json!({
            "table": table_name,
            "column": column.name,
            "type": abstract_type.as_str(),
            "length": column.length,
            "primaryKey": column.primary_key,
        }))
}

/// Tree of logical models nested under their parents.
///
/// Models whose parent is absent from the input are treated as roots; input
/// order is preserved at every level.
pub fn logical_model_tree(models: &[LogicalModel]) -> TreeNode {
    let roots: Vec<TreeNode> = models
        .iter()
        .filter(|m| {
            m.parent
                .as_deref()
                .map(|p| !models.iter().any(|other| other.name == p))
                .unwrap_or(true)
        })
        .map(|m| model_node(m, models))
        .collect();
    TreeNode::branch("models").with_children(roots).expanded()
}

fn model_node(model: &LogicalModel, all: &[LogicalModel]) -> TreeNode {
    let children: Vec<TreeNode> = all
        .iter()
        .filter(|m| m.parent.as_deref() == Some(model.name.as_str()))
        .map(|m| model_node(m, all))
        .collect();
    let mut node = TreeNode::branch(&model.name)
        .with_icon("model")
        .with_payload(json!({
            "partition": model.partition,
            "connection": model.effective_connection(all),
        }));
    node.leaf = children.is_empty();
    node.with_children(children)
}
