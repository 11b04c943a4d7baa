//! Source map for bidirectional mapping between output offsets and source lines

/// Bidirectional mapping between output offsets and source lines
///
/// The encoder records instructions in a single forward scan, so both maps
/// are built already sorted and can be binary searched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMap {
    /// Forward map: instruction offset → source location
    offset_to_source: Vec<(usize, SourceLocation)>,

    /// Reverse map: source line → output byte range
    source_to_offset: Vec<(usize, OffsetRange)>,
}

/// A location in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,

    /// Number of bytes the instruction on this line emitted
    pub length: usize,
}

/// A range of output byte offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetRange {
    /// Starting offset (inclusive)
    pub start: usize,

    /// Ending offset (exclusive)
    pub end: usize,
}

impl SourceMap {
    /// Create a new empty source map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the instruction on `line` emitted `length` bytes at `offset`
    ///
    /// Calls must arrive in increasing offset and line order.
    pub fn add_mapping(&mut self, offset: usize, location: SourceLocation) {
        debug_assert!(self
            .offset_to_source
            .last()
            .map_or(true, |(last, _)| *last < offset));

        self.offset_to_source.push((offset, location));
        self.source_to_offset.push((
            location.line,
            OffsetRange {
                start: offset,
                end: offset + location.length,
            },
        ));
    }

    /// Get the source location of the instruction covering `offset`
    ///
    /// Operand bytes map to the line of their opcode.
    pub fn get_source_location(&self, offset: usize) -> Option<SourceLocation> {
        let idx = self
            .offset_to_source
            .partition_point(|(start, _)| *start <= offset);
        let (start, location) = self.offset_to_source.get(idx.checked_sub(1)?)?;

        (offset < start + location.length).then_some(*location)
    }

    /// Get the output byte range produced by a source line
    pub fn get_offset_range(&self, line: usize) -> Option<OffsetRange> {
        self.source_to_offset
            .binary_search_by_key(&line, |(l, _)| *l)
            .ok()
            .map(|idx| self.source_to_offset[idx].1)
    }

    /// Number of mapped instructions
    pub fn len(&self) -> usize {
        self.offset_to_source.len()
    }

    /// Whether no instructions have been mapped
    pub fn is_empty(&self) -> bool {
        self.offset_to_source.is_empty()
    }
}
