/// Unordered per-kind entity containers.

use crate::geometry::Rect;

/// Anything with a collision rectangle.
pub trait Body {
    fn rect(&self) -> Rect;
}

/// An entity that advances itself each tick and may remove itself.
pub trait Actor {
    fn update(&mut self);
    fn is_alive(&self) -> bool;
}

#[derive(Clone, Debug)]
pub struct Group<T> {
    members: Vec<T>,
}

impl<T> Default for Group<T> {
    fn default() -> Self {
        Group {
            members: Vec::new(),
        }
    }
}

impl<T> Group<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, member: T) {
        self.members.push(member);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.members.iter_mut()
    }

    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.members.retain(keep);
    }
}

impl<T> Extend<T> for Group<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.members.extend(iter);
    }
}

impl<T> FromIterator<T> for Group<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Group {
            members: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Group<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<T: Body> Group<T> {
    /// Remove and return every member overlapping `rect`.
    pub fn drain_overlapping(&mut self, rect: &Rect) -> Vec<T> {
        let (hit, keep): (Vec<T>, Vec<T>) = std::mem::take(&mut self.members)
            .into_iter()
            .partition(|member| member.rect().overlaps(rect));
        self.members = keep;
        hit
    }
}

impl<T: Actor> Group<T> {
    /// Update every member, then drop the ones that died doing so.
    pub fn update(&mut self) {
        for member in &mut self.members {
            member.update();
        }
        self.members.retain(|member| member.is_alive());
    }
}
