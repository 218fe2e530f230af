//! Moderation flags and their initial values.
//!
//! Every listable entity carries one visibility flag that decides whether
//! anonymous listings include it. The flags are independent booleans:
//! `approved = false, featured = true` is a legal combination.

/// The boolean column that gates anonymous visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityFlag {
    Approved,
    Active,
    Published,
}

impl VisibilityFlag {
    /// Column name in the backing table.
    pub fn column(self) -> &'static str {
        match self {
            VisibilityFlag::Approved => "approved",
            VisibilityFlag::Active => "active",
            VisibilityFlag::Published => "published",
        }
    }
}

/// Entity kinds that go through moderation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeratedEntity {
    Company,
    Review,
    Job,
    Property,
    News,
}

impl ModeratedEntity {
    pub fn visibility(self) -> VisibilityFlag {
        match self {
            ModeratedEntity::Company | ModeratedEntity::Review => VisibilityFlag::Approved,
            ModeratedEntity::Job | ModeratedEntity::Property => VisibilityFlag::Active,
            ModeratedEntity::News => VisibilityFlag::Published,
        }
    }

    /// Whether new records must wait for an admin before becoming visible.
    pub fn requires_approval(self) -> bool {
        matches!(self, ModeratedEntity::Company | ModeratedEntity::Review)
    }

    /// Visibility a freshly created record starts with.
    ///
    /// Companies and reviews always start hidden regardless of what the
    /// submitter asked for. Jobs, properties and news start visible unless
    /// the submitter explicitly overrides it.
    pub fn initial_visibility(self, requested: Option<bool>) -> bool {
        if self.requires_approval() {
            false
        } else {
            requested.unwrap_or(true)
        }
    }
}
