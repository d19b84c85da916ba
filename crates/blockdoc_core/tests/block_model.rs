use blockdoc_core::{Block, BlockType, BlockValidationError, Document, DocumentError};
use uuid::Uuid;

fn id(value: &str) -> Uuid {
    Uuid::parse_str(value).unwrap()
}

#[test]
fn block_new_sets_defaults() {
    let block = Block::new(BlockType::Paragraph, "hello");

    assert!(!block.id.is_nil());
    assert_eq!(block.kind, BlockType::Paragraph);
    assert_eq!(block.content, "hello");
    assert!(block.children.is_empty());
    assert!(!block.is_empty());
}

#[test]
fn fresh_blocks_get_distinct_ids() {
    let a = Block::empty_paragraph();
    let b = Block::empty_paragraph();
    assert_ne!(a.id, b.id);
}

#[test]
fn block_serialization_uses_expected_wire_fields() {
    let block_id = id("11111111-2222-4333-8444-555555555555");
    let block = Block::with_id(block_id, BlockType::ToDoItem, "ship it").unwrap();

    let json = serde_json::to_value(&block).unwrap();
    assert_eq!(json["id"], block_id.to_string());
    assert_eq!(json["type"], "to-do-item");
    assert_eq!(json["content"], "ship it");
    assert_eq!(json["children"], serde_json::json!([]));

    let decoded: Block = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, block);
}

#[test]
fn block_without_children_field_deserializes() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "type": "heading-2",
        "content": "Section"
    });
    let block: Block = serde_json::from_value(value).unwrap();
    assert_eq!(block.kind, BlockType::Heading2);
    assert!(block.children.is_empty());
}

#[test]
fn document_deserialize_rejects_duplicate_ids() {
    let value = serde_json::json!({
        "blocks": [
            {"id": "11111111-2222-4333-8444-555555555555", "type": "paragraph", "content": "a"},
            {"id": "11111111-2222-4333-8444-555555555555", "type": "quote", "content": "b"}
        ]
    });

    let err = serde_json::from_value::<Document>(value).unwrap_err();
    assert!(
        err.to_string().contains("duplicate block id"),
        "unexpected error: {err}"
    );
}

#[test]
fn document_deserialize_rejects_empty_sequence() {
    let value = serde_json::json!({ "blocks": [] });
    let err = serde_json::from_value::<Document>(value).unwrap_err();
    assert!(
        err.to_string().contains("at least one block"),
        "unexpected error: {err}"
    );
}

#[test]
fn document_json_round_trip_keeps_order() {
    let doc = Document::from_blocks(vec![
        Block::new(BlockType::Heading1, "Title"),
        Block::new(BlockType::Divider, ""),
        Block::new(BlockType::Code, "let x = 1;"),
    ])
    .unwrap();

    let json = serde_json::to_string(&doc).unwrap();
    let decoded: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, doc);
}

#[test]
fn from_blocks_rejects_nil_id() {
    let mut block = Block::new(BlockType::Image, "https://example.com/a.png");
    block.id = Uuid::nil();
    let err = Document::from_blocks(vec![block]).unwrap_err();
    assert_eq!(err, DocumentError::InvalidBlock(BlockValidationError::NilId));
}
