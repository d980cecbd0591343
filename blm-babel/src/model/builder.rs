//! The narrow interface through which decoders mutate a host document.
//!
//! Decoders never construct a document from scratch: they always continue from
//! whatever block and character style the host cursor currently has, which is
//! why the first block of a decode is special (it already exists).

use crate::model::nodes::{Block, BlockFormat, CharStyle, Document};

/// Host-provided sink for decoded structure.
pub trait DocumentBuilder {
    /// Opens an edit batch. Everything until the matching [`end_batch`]
    /// is one atomic edit for undo purposes.
    ///
    /// [`end_batch`]: DocumentBuilder::end_batch
    fn begin_batch(&mut self);

    fn end_batch(&mut self);

    /// Format of the block the cursor is in.
    fn current_block_format(&self) -> BlockFormat;

    /// Applies `format` to the block the cursor is in.
    fn merge_block_format(&mut self, format: &BlockFormat);

    /// Starts a new block after the current one and moves the cursor into it.
    fn insert_block(&mut self, format: &BlockFormat, char_style: CharStyle);

    fn insert_text(&mut self, text: &str, style: CharStyle);

    /// Character style the cursor would type with.
    fn current_char_style(&self) -> CharStyle;
}

/// Edits a [`Document`] in place, with the cursor at the end of its last block.
pub struct Cursor<'a> {
    doc: &'a mut Document,
    char_style: CharStyle,
    batch_depth: usize,
    completed_batches: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(doc: &'a mut Document) -> Self {
        if doc.blocks.is_empty() {
            doc.blocks.push(Block::empty());
        }
        let char_style = doc
            .blocks
            .last()
            .and_then(|block| block.runs.last())
            .map(|run| run.style)
            .unwrap_or_default();
        Self {
            doc,
            char_style,
            batch_depth: 0,
            completed_batches: 0,
        }
    }

    /// Number of top-level batches closed through this cursor.
    pub fn completed_batches(&self) -> usize {
        self.completed_batches
    }

    pub fn in_batch(&self) -> bool {
        self.batch_depth > 0
    }

    fn block_mut(&mut self) -> &mut Block {
        if self.doc.blocks.is_empty() {
            self.doc.blocks.push(Block::empty());
        }
        let last = self.doc.blocks.len() - 1;
        &mut self.doc.blocks[last]
    }
}

impl DocumentBuilder for Cursor<'_> {
    fn begin_batch(&mut self) {
        self.batch_depth += 1;
    }

    fn end_batch(&mut self) {
        match self.batch_depth {
            0 => {}
            1 => {
                self.batch_depth = 0;
                self.completed_batches += 1;
            }
            _ => self.batch_depth -= 1,
        }
    }

    fn current_block_format(&self) -> BlockFormat {
        self.doc
            .blocks
            .last()
            .map(|block| block.format)
            .unwrap_or_default()
    }

    fn merge_block_format(&mut self, format: &BlockFormat) {
        self.block_mut().format = *format;
    }

    fn insert_block(&mut self, format: &BlockFormat, char_style: CharStyle) {
        self.doc.blocks.push(Block::new(*format));
        self.char_style = char_style;
    }

    fn insert_text(&mut self, text: &str, style: CharStyle) {
        self.block_mut().push_run(text, style);
        self.char_style = style;
    }

    fn current_char_style(&self) -> CharStyle {
        self.char_style
    }
}
