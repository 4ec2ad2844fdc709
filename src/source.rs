use std::ops::{Deref, DerefMut};

/// Source is a cursor over the bytes of a field value.
///
/// It reads one byte at a time and can put back the byte it read
/// last.  Positions are byte offsets from the beginning of the data.
#[derive(Debug, Clone)]
pub struct Source<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Source<'a> {
    /// Creates new Source with the given data.
    pub fn new(data: &'a [u8]) -> Source<'a> {
        Source { data, pos: 0 }
    }

    /// Returns the next byte, or `None` if the end of data is
    /// reached.  Reading past the end does not move the cursor.
    pub fn getch(&mut self) -> Option<u8> {
        let ch = *self.data.get(self.pos)?;
        self.pos += 1;

        Some(ch)
    }

    /// Puts back the byte most recently returned by [Source::getch].
    ///
    /// Only valid right after a successful `getch`.  After `getch`
    /// returned `None` the cursor would step back over the last byte
    /// of data instead.
    pub fn putback(&mut self) {
        debug_assert!(self.pos > 0, "putback at the beginning of data");

        self.pos = self.pos.saturating_sub(1);
    }

    /// Returns the current position of the cursor.
    pub fn current_position(&self) -> usize {
        self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn eof(&self) -> bool {
        self.pos == self.data.len()
    }

    /// Returns the data that has not been consumed yet.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Starts a consumed region at the current position.
    ///
    /// The returned guard restores the cursor to that position when it
    /// is dropped, unless [Consumer::commit] was called.
    ///
    /// ```
    /// use hfparse::Source;
    ///
    /// let mut from = Source::from("abc");
    ///
    /// {
    ///     let mut consumer = from.consumer();
    ///     consumer.getch();
    ///     consumer.getch();
    /// }
    /// assert_eq!(0, from.current_position());
    ///
    /// {
    ///     let mut consumer = from.consumer();
    ///     consumer.getch();
    ///     consumer.commit();
    /// }
    /// assert_eq!(1, from.current_position());
    /// ```
    pub fn consumer(&mut self) -> Consumer<'_, 'a> {
        let started_at = self.pos;

        Consumer {
            from: self,
            started_at,
            committed: false,
        }
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(data: &'a str) -> Source<'a> {
        Source::new(data.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for Source<'a> {
    fn from(data: &'a [u8]) -> Source<'a> {
        Source::new(data)
    }
}

/// Consumer is a guard over a region of [Source] being consumed.
///
/// The cursor goes back to [Consumer::started_at] when the guard is
/// dropped without [Consumer::commit].
#[derive(Debug)]
pub struct Consumer<'s, 'a> {
    from: &'s mut Source<'a>,
    started_at: usize,
    committed: bool,
}

impl Consumer<'_, '_> {
    /// Returns the position where the region started.
    pub fn started_at(&self) -> usize {
        self.started_at
    }

    /// Accepts everything consumed in the region.
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl<'a> Deref for Consumer<'_, 'a> {
    type Target = Source<'a>;

    fn deref(&self) -> &Source<'a> {
        &*self.from
    }
}

impl<'a> DerefMut for Consumer<'_, 'a> {
    fn deref_mut(&mut self) -> &mut Source<'a> {
        &mut *self.from
    }
}

impl Drop for Consumer<'_, '_> {
    fn drop(&mut self) {
        if !self.committed {
            self.from.pos = self.started_at;
        }
    }
}
