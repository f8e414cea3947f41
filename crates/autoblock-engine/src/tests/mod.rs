//! A small rope-backed editor state for exercising the plugin end to end.

use std::borrow::Cow;
use std::fmt;

use serde_json::{Map, Value};
use xi_rope::Rope;
use xi_rope::delta::Builder;

use crate::matching::byte_index;
use crate::{BlockProperties, EditorState, Transform};


#[derive(Clone)]
pub struct Block {
    pub kind: String,
    pub data: Map<String, Value>,
    pub is_void: bool,
    pub text: Rope,
}

impl Block {
    pub fn new(kind: &str, text: &str) -> Self {
        Self {
            kind: kind.to_string(),
            data: Map::new(),
            is_void: false,
            text: Rope::from(text),
        }
    }

    pub fn paragraph(text: &str) -> Self {
        Self::new("paragraph", text)
    }

    pub fn text(&self) -> String {
        self.text.to_string()
    }

    fn char_len(&self) -> usize {
        self.text().chars().count()
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("kind", &self.kind)
            .field("data", &self.data)
            .field("is_void", &self.is_void)
            .field("text", &self.text())
            .finish()
    }
}

/// Blocks plus a selection inside one of them, in chars.
#[derive(Debug, Clone)]
pub struct TestDocument {
    blocks: Vec<Block>,
    block: usize,
    anchor: usize,
    focus: usize,
    version: u64,
}

impl TestDocument {
    /// Cursor starts at the end of the first block.
    pub fn new(blocks: Vec<Block>) -> Self {
        let end = blocks.first().map_or(0, Block::char_len);
        Self {
            blocks,
            block: 0,
            anchor: end,
            focus: end,
            version: 0,
        }
    }

    pub fn with_cursor(self, block: usize, offset: usize) -> Self {
        self.with_selection(block, offset, offset)
    }

    pub fn with_selection(mut self, block: usize, anchor: usize, focus: usize) -> Self {
        self.block = block;
        self.anchor = anchor;
        self.focus = focus;
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> &Block {
        &self.blocks[index]
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.block, self.focus)
    }

    fn run(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::MoveToOffsets { start, end } => {
                let len = self.blocks[self.block].char_len();
                self.anchor = start.min(len);
                self.focus = end.min(len);
            }
            Cmd::Delete => {
                let start = self.anchor.min(self.focus);
                let end = self.anchor.max(self.focus);
                let block = &mut self.blocks[self.block];
                let text = block.text();
                let range = byte_index(&text, start)..byte_index(&text, end);

                let mut builder = Builder::new(block.text.len());
                builder.delete(range);
                block.text = builder.build().apply(&block.text);

                self.anchor = start;
                self.focus = start;
            }
            Cmd::SetBlock(properties) => {
                let block = &mut self.blocks[self.block];
                block.kind = properties.kind;
                block.data = properties.data;
                if let Some(is_void) = properties.is_void {
                    block.is_void = is_void;
                }
            }
        }
    }
}

impl EditorState for TestDocument {
    type Transform = TestTransform;

    fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    fn start_block_kind(&self) -> &str {
        &self.blocks[self.block].kind
    }

    fn start_block_text(&self) -> Cow<'_, str> {
        let text = &self.blocks[self.block].text;
        text.slice_to_cow(0..text.len())
    }

    fn start_offset(&self) -> usize {
        self.anchor.min(self.focus)
    }

    fn transform(&self) -> TestTransform {
        TestTransform {
            base: self.clone(),
            cmds: Vec::new(),
        }
    }
}

/// Steps recorded by [`TestTransform`], replayed on `apply`.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    MoveToOffsets { start: usize, end: usize },
    Delete,
    SetBlock(BlockProperties),
}

pub struct TestTransform {
    base: TestDocument,
    cmds: Vec<Cmd>,
}

impl Transform for TestTransform {
    type State = TestDocument;

    fn move_to_offsets(mut self, start: usize, end: usize) -> Self {
        self.cmds.push(Cmd::MoveToOffsets { start, end });
        self
    }

    fn delete(mut self) -> Self {
        self.cmds.push(Cmd::Delete);
        self
    }

    fn set_block(mut self, properties: &BlockProperties) -> Self {
        self.cmds.push(Cmd::SetBlock(properties.clone()));
        self
    }

    fn apply(self) -> TestDocument {
        let mut doc = self.base;
        for cmd in self.cmds {
            doc.run(cmd);
        }
        doc.version += 1;
        doc
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
