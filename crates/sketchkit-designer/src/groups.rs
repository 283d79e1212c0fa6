//! Named groups and shape membership.

use crate::model::{Shape, ShapeId};
use sketchkit_core::{shared, Shared, ShapeError};
use std::rc::Rc;

/// Owns every group of a drawing and edits their membership.
///
/// Groups are [`Shape`]s of kind `Group`, so a group's id is its shape id.
/// The manager hands out shared handles; adding a group to a
/// [`Figure`](crate::Figure) makes it pickable and drawable like any other
/// shape.
///
/// # Examples
///
/// ```
/// use sketchkit_designer::{GroupManager, Shape};
/// use sketchkit_core::shared;
///
/// let rect = shared(Shape::rect(10.0, 10.0, 20.0, 20.0));
/// let mut groups = GroupManager::new();
/// let group = groups.create_group(&rect);
///
/// assert_eq!(group.borrow().as_group().map(|g| g.name().to_string()), Some("Group 1".to_string()));
/// assert_eq!(groups.groups_for_shape(&rect).len(), 1);
/// ```
#[derive(Debug)]
pub struct GroupManager {
    groups: Vec<Shared<Shape>>,
    next_number: usize,
}

impl Default for GroupManager {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            next_number: 1,
        }
    }
}

impl GroupManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a group named `Group N` whose first member is `shape`.
    pub fn create_group(&mut self, shape: &Shared<Shape>) -> Shared<Shape> {
        let mut group = Shape::group(format!("Group {}", self.next_number));
        self.next_number += 1;
        if let Some(g) = group.as_group_mut() {
            g.add(shape);
        }
        tracing::debug!("Created group {}", group.id());
        let group = shared(group);
        self.groups.push(Rc::clone(&group));
        group
    }

    /// Add `shape` to the group with id `group_id`.
    ///
    /// # Errors
    ///
    /// [`ShapeError::GroupNotFound`] when no group has that id.
    pub fn add_to_group(&self, group_id: &ShapeId, shape: &Shared<Shape>) -> Result<(), ShapeError> {
        let group = self.require(group_id)?;
        let mut group = group.borrow_mut();
        if let Some(g) = group.as_group_mut() {
            g.add(shape);
        }
        Ok(())
    }

    /// Remove `shape` from the group with id `group_id`. Returns whether the
    /// shape was a member.
    ///
    /// # Errors
    ///
    /// [`ShapeError::GroupNotFound`] when no group has that id.
    pub fn remove_from_group(
        &self,
        group_id: &ShapeId,
        shape: &Shared<Shape>,
    ) -> Result<bool, ShapeError> {
        let group = self.require(group_id)?;
        let mut group = group.borrow_mut();
        Ok(group.as_group_mut().map(|g| g.remove(shape)).unwrap_or(false))
    }

    pub fn groups(&self) -> &[Shared<Shape>] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, group_id: &ShapeId) -> Option<Shared<Shape>> {
        self.groups
            .iter()
            .find(|g| g.borrow().id() == group_id)
            .cloned()
    }

    /// First group called `name`.
    pub fn group_by_name(&self, name: &str) -> Option<Shared<Shape>> {
        self.groups
            .iter()
            .find(|g| g.borrow().as_group().is_some_and(|g| g.name() == name))
            .cloned()
    }

    /// Groups that currently contain `shape`, in creation order.
    pub fn groups_for_shape(&self, shape: &Shared<Shape>) -> Vec<Shared<Shape>> {
        self.groups
            .iter()
            .filter(|g| g.borrow().as_group().is_some_and(|g| g.has_shape(shape)))
            .cloned()
            .collect()
    }

    /// Make `shape` a member of exactly the groups in `wanted`: it joins the
    /// listed groups it is not yet in and leaves every other group.
    ///
    /// # Errors
    ///
    /// [`ShapeError::GroupNotFound`] for an unknown id in `wanted`; nothing
    /// is changed in that case.
    pub fn sync_memberships(&self, shape: &Shared<Shape>, wanted: &[ShapeId]) -> Result<(), ShapeError> {
        for id in wanted {
            self.require(id)?;
        }
        for group in &self.groups {
            let mut group = group.borrow_mut();
            let keep = wanted.contains(group.id());
            if let Some(g) = group.as_group_mut() {
                if keep {
                    g.add(shape);
                } else {
                    g.remove(shape);
                }
            }
        }
        Ok(())
    }

    /// Forget a group. Its members are untouched.
    pub fn delete_group(&mut self, group_id: &ShapeId) -> Option<Shared<Shape>> {
        let index = self.groups.iter().position(|g| g.borrow().id() == group_id)?;
        tracing::debug!("Deleted group {}", group_id);
        Some(self.groups.remove(index))
    }

    fn require(&self, group_id: &ShapeId) -> Result<Shared<Shape>, ShapeError> {
        self.group(group_id).ok_or_else(|| ShapeError::GroupNotFound {
            id: group_id.to_string(),
        })
    }
}
