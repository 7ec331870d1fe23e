use facet_core::Shape;

/// Errors raised when a type's constraint attributes are inconsistent with
/// its declaration, or when reflection cannot read or rebuild a value.
///
/// Running out of input is never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// A method tag names a method that is not registered for the struct.
    MethodNotFound {
        /// Struct carrying the tag
        owner: &'static str,
        /// Field carrying the tag
        field: &'static str,
        /// Method named by the tag
        method: &'static str,
    },

    /// The method returned something other than a sequence.
    NotASequence {
        /// Struct carrying the tag
        owner: &'static str,
        /// Field carrying the tag
        field: &'static str,
        /// Method named by the tag
        method: &'static str,
        /// Type the method actually returned
        found: String,
    },

    /// The method returned a sequence with no elements in it.
    EmptyCandidates {
        /// Struct carrying the tag
        owner: &'static str,
        /// Field carrying the tag
        field: &'static str,
        /// Method named by the tag
        method: &'static str,
    },

    /// The sequence elements cannot be stored in the field.
    NotAssignable {
        /// Struct carrying the tag
        owner: &'static str,
        /// Field carrying the tag
        field: &'static str,
        /// Method named by the tag
        method: &'static str,
        /// Element type of the returned sequence
        element: String,
        /// Type the elements would have to be
        target: String,
    },

    /// Reading or rebuilding a value through reflection failed, e.g. a
    /// value that cannot be generated has no `Default` to fall back on.
    Reflect {
        /// Type being read or rebuilt
        owner: &'static str,
        /// What facet-reflect reported
        message: String,
    },
}

impl ShapeError {
    pub(crate) fn reflect(shape: &'static Shape, err: impl core::fmt::Display) -> Self {
        ShapeError::Reflect {
            owner: shape.type_identifier,
            message: err.to_string(),
        }
    }

    /// The type whose declaration is at fault.
    pub fn owner(&self) -> &'static str {
        match self {
            ShapeError::MethodNotFound { owner, .. }
            | ShapeError::NotASequence { owner, .. }
            | ShapeError::EmptyCandidates { owner, .. }
            | ShapeError::NotAssignable { owner, .. }
            | ShapeError::Reflect { owner, .. } => owner,
        }
    }

    /// The field carrying the offending tag, if a tag is to blame.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ShapeError::MethodNotFound { field, .. }
            | ShapeError::NotASequence { field, .. }
            | ShapeError::EmptyCandidates { field, .. }
            | ShapeError::NotAssignable { field, .. } => Some(field),
            ShapeError::Reflect { .. } => None,
        }
    }
}

impl core::fmt::Display for ShapeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ShapeError::MethodNotFound {
                owner,
                field,
                method,
            } => write!(
                f,
                "{owner}.{method}() could not be found and can't be called (referenced by {owner}.{field})"
            ),
            ShapeError::NotASequence {
                owner,
                field,
                method,
                found,
            } => write!(
                f,
                "{owner}.{field} cannot be assigned by every value returned by {owner}.{method}(), method must return a sequence, but it returns {found}"
            ),
            ShapeError::EmptyCandidates {
                owner,
                field,
                method,
            } => write!(
                f,
                "{owner}.{field} has options method {owner}.{method}(), but it returns an empty sequence"
            ),
            ShapeError::NotAssignable {
                owner,
                field,
                method,
                element,
                target,
            } => write!(
                f,
                "{owner}.{field} cannot be assigned by every value returned by {owner}.{method}(), value of type {element} cannot be assigned to {target}"
            ),
            ShapeError::Reflect { owner, message } => {
                write!(f, "reflecting over {owner} failed: {message}")
            }
        }
    }
}

impl core::error::Error for ShapeError {}
