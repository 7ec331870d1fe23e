use core::fmt::Debug;
use std::rc::Rc;

use facet::Facet;

use crate::tags::{FieldTags, MethodValues};
use crate::{Candidates, Generator, ShapeError};

impl Generator {
    /// Builds a list of enum values from fuzzer input.
    ///
    /// Every element starts as one of `candidates`, chosen by the input,
    /// and then has the fields of its variant filled in like any other
    /// value. The list keeps growing while input remains.
    ///
    /// ```
    /// use facet::Facet;
    /// use fuzzshape::Generator;
    ///
    /// #[derive(Facet, Debug, PartialEq)]
    /// #[repr(u8)]
    /// enum Animal {
    ///     Bird { legs: u8 },
    ///     Cat { legs: u8 },
    /// }
    ///
    /// let candidates = vec![Animal::Bird { legs: 2 }, Animal::Cat { legs: 4 }];
    /// let mut input = Vec::new();
    /// input.extend_from_slice(&1usize.to_le_bytes()); // a cat
    /// input.push(3); // with three legs
    /// input.extend_from_slice(&0usize.to_le_bytes()); // a bird
    /// input.push(2);
    ///
    /// let animals = Generator::new().make_slice_of(candidates, &input).unwrap();
    /// assert_eq!(animals, [Animal::Cat { legs: 3 }, Animal::Bird { legs: 2 }]);
    /// ```
    pub fn make_slice_of<E>(&self, candidates: Vec<E>, bytes: &[u8]) -> Result<Vec<E>, ShapeError>
    where
        E: Facet<'static> + Debug,
    {
        if candidates.is_empty() {
            return Err(ShapeError::EmptyCandidates {
                owner: E::SHAPE.type_identifier,
                field: "elements",
                method: "make_slice_of",
            });
        }
        let tags = FieldTags {
            interface_values: Some(MethodValues {
                method: "make_slice_of",
                candidates: Candidates::new(&candidates)?,
            }),
            ..FieldTags::default()
        };

        let mut elements = Vec::new();
        self.fill_with(&mut elements, &mut crate::ByteConsumer::new(bytes), Rc::new(tags))?;
        Ok(elements)
    }
}

/// [`Generator::make_slice_of`] without registered methods.
pub fn make_slice_of<E>(candidates: Vec<E>, bytes: &[u8]) -> Result<Vec<E>, ShapeError>
where
    E: Facet<'static> + Debug,
{
    Generator::new().make_slice_of(candidates, bytes)
}
