use glam::Vec3;
use indexmap::IndexMap;

use super::object::{ObjectId, SceneObject};
use super::tag::Tag;

/// Flat object store with parent links. Insertion order is draw order
/// for equal depths.
#[derive(Debug, Default)]
pub struct Scene {
    objects: IndexMap<ObjectId, SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, object: SceneObject) -> ObjectId {
        let id = object.id;
        self.objects.insert(id, object);
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    pub fn ids_tagged(&self, tag: Tag) -> Vec<ObjectId> {
        self.objects
            .values()
            .filter(|o| o.tag == tag)
            .map(|o| o.id)
            .collect()
    }

    pub fn count_tagged(&self, tag: Tag) -> usize {
        self.objects.values().filter(|o| o.tag == tag).count()
    }

    /// `id` followed by every object attached below it.
    pub fn subtree(&self, id: ObjectId) -> Vec<ObjectId> {
        let mut out = Vec::new();
        if !self.contains(id) {
            return out;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(
                self.objects
                    .values()
                    .filter(|o| o.parent == Some(current))
                    .map(|o| o.id),
            );
        }
        out
    }

    /// Removes the given objects and everything attached to them.
    /// Returns the ids actually removed.
    pub fn remove_all(&mut self, ids: &[ObjectId]) -> Vec<ObjectId> {
        let mut removed = Vec::new();
        for id in ids {
            for member in self.subtree(*id) {
                if self.objects.shift_remove(&member).is_some() {
                    removed.push(member);
                }
            }
        }
        removed
    }

    pub fn world_position(&self, id: ObjectId) -> Option<Vec3> {
        let object = self.objects.get(&id)?;
        let mut position = object.position;
        let mut parent = object.parent;
        while let Some(parent_id) = parent {
            let Some(p) = self.objects.get(&parent_id) else {
                break;
            };
            position += p.position;
            parent = p.parent;
        }
        Some(position)
    }

    /// Scale inherited through parents.
    pub fn world_scale(&self, id: ObjectId) -> Option<f32> {
        let object = self.objects.get(&id)?;
        let mut scale = object.scale;
        let mut parent = object.parent;
        while let Some(parent_id) = parent {
            let Some(p) = self.objects.get(&parent_id) else {
                break;
            };
            scale *= p.scale;
            parent = p.parent;
        }
        Some(scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removing_parent_removes_children() {
        let mut scene = Scene::new();
        let parent = scene.insert(SceneObject::sphere(0.4).at(Vec3::new(1.0, 2.0, 3.0)));
        let mut halo = SceneObject::sphere(0.6);
        halo.parent = Some(parent);
        let halo = scene.insert(halo);
        let other = scene.insert(SceneObject::cuboid(0.2));

        assert_eq!(scene.world_position(halo), Some(Vec3::new(1.0, 2.0, 3.0)));

        let removed = scene.remove_all(&[parent]);
        assert_eq!(removed.len(), 2);
        assert!(!scene.contains(halo));
        assert!(scene.contains(other));
    }

    #[test]
    fn test_world_scale_multiplies_through_parents() {
        let mut scene = Scene::new();
        let parent = scene.insert(SceneObject::sphere(0.4).with_scale(0.5));
        let mut child = SceneObject::sphere(0.6).with_scale(2.0);
        child.parent = Some(parent);
        let child = scene.insert(child);
        assert_eq!(scene.world_scale(child), Some(1.0));
    }
}
