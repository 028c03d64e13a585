use std::fmt;

/// One observation of the mail client's message counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReading {
    /// Messages the client flagged as new.
    pub new: u64,
    /// Messages not yet read, the new ones included.
    pub unread: u64,
    /// Total messages in the mailbox.
    pub total: u64,
}

impl StatusReading {
    /// Signed element-wise difference against an earlier reading.
    pub fn delta(&self, previous: &StatusReading) -> ReadingDelta {
        ReadingDelta {
            new: self.new as i64 - previous.new as i64,
            unread: self.unread as i64 - previous.unread as i64,
            total: self.total as i64 - previous.total as i64,
        }
    }

    /// Per-field strict-increase flags against an earlier reading.
    pub fn grew_since(&self, previous: &StatusReading) -> Growth {
        Growth {
            new: self.new > previous.new,
            unread: self.unread > previous.unread,
            total: self.total > previous.total,
        }
    }
}

impl fmt::Display for StatusReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} new, {} unread, {} total",
            self.new, self.unread, self.total
        )
    }
}

/// Which counters strictly increased between two readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Growth {
    pub new: bool,
    pub unread: bool,
    pub total: bool,
}

impl Growth {
    /// Whether mail actually arrived. Only `new` and `unread` count here;
    /// `total` moves on its own when messages are deleted or re-flagged.
    pub fn mail_arrived(&self) -> bool {
        self.new || self.unread
    }
}

/// Signed field-wise difference between two readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingDelta {
    pub new: i64,
    pub unread: i64,
    pub total: i64,
}

impl ReadingDelta {
    /// Clip the delta down to the two numbers worth telling the user about.
    ///
    /// Negative components floor to zero, and since every newly-new message
    /// is also newly-unread, the unread figure excludes the new ones rather
    /// than counting them twice.
    pub fn clipped(&self) -> NotifyCounts {
        let arrived = self.new.max(0) as u64;
        let newly_unread = (self.unread.max(0) as u64).saturating_sub(arrived);
        NotifyCounts {
            arrived,
            newly_unread,
        }
    }
}

/// What one notification reports: mail that just arrived, plus messages
/// that became unread without being new.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyCounts {
    pub arrived: u64,
    pub newly_unread: u64,
}
