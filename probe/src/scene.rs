use std::{collections::BTreeMap, fmt, path::Path};

use anyhow::Context;
use geometry::{AABB, DisplayVec3, Plane, RayIntersection, SegmentIntersection};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Named boxes and planes plus the queries to run against them.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub boxes: BTreeMap<String, AABB>,
    #[serde(default)]
    pub planes: BTreeMap<String, Plane>,
    #[serde(default)]
    pub queries: Vec<Query>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Query {
    Intersects(String, String),
    Intersection(String, String),
    Encloses(String, String),
    Merge(String, String),
    HasPoint(String, Vec3),
    Plane(String, String),
    Segment { target: String, from: Vec3, to: Vec3 },
    Ray { target: String, from: Vec3, dir: Vec3 },
    Support(String, Vec3),
    Grow(String, f32),
    Expand(String, Vec3),
    Endpoint(String, i32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Bool(bool),
    Box(AABB),
    Point(Vec3),
    Segment(Option<SegmentIntersection>),
    Ray(Option<RayIntersection>),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Bool(value) => write!(f, "{}", value),
            Outcome::Box(aabb) => write!(f, "{}", aabb),
            Outcome::Point(point) => write!(f, "{}", DisplayVec3(*point)),
            Outcome::Segment(None) | Outcome::Ray(None) => write!(f, "miss"),
            Outcome::Segment(Some(hit)) => write!(
                f,
                "hit at {} normal {}",
                DisplayVec3(hit.point),
                DisplayVec3(hit.normal)
            ),
            Outcome::Ray(Some(hit)) => write!(
                f,
                "hit at {} normal {}{}",
                DisplayVec3(hit.point),
                DisplayVec3(hit.normal),
                if hit.inside { " (from inside)" } else { "" }
            ),
        }
    }
}

impl Scene {
    pub fn load(path: &Path) -> anyhow::Result<Scene> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene {:?}", path))?;
        Self::parse(&data).with_context(|| format!("Failed to parse scene {:?}", path))
    }

    pub fn parse(data: &str) -> anyhow::Result<Scene> {
        let scene: Scene = ron::from_str(data)?;

        for (name, aabb) in &scene.boxes {
            if !aabb.is_finite() {
                log::warn!("Box {:?} has non-finite components: {}", name, aabb);
            }
        }

        Ok(scene)
    }

    fn aabb(&self, name: &str) -> anyhow::Result<&AABB> {
        self.boxes
            .get(name)
            .with_context(|| format!("Unknown box {:?}", name))
    }

    fn plane(&self, name: &str) -> anyhow::Result<&Plane> {
        self.planes
            .get(name)
            .with_context(|| format!("Unknown plane {:?}", name))
    }

    pub fn evaluate(&self, query: &Query) -> anyhow::Result<Outcome> {
        let outcome = match query {
            Query::Intersects(a, b) => Outcome::Bool(self.aabb(a)?.intersects(self.aabb(b)?)),
            Query::Intersection(a, b) => Outcome::Box(self.aabb(a)?.intersection(self.aabb(b)?)),
            Query::Encloses(a, b) => Outcome::Bool(self.aabb(a)?.encloses(self.aabb(b)?)),
            Query::Merge(a, b) => Outcome::Box(self.aabb(a)?.merge(self.aabb(b)?)),
            Query::HasPoint(target, point) => Outcome::Bool(self.aabb(target)?.has_point(*point)),
            Query::Plane(target, plane) => {
                Outcome::Bool(self.aabb(target)?.intersects_plane(self.plane(plane)?))
            }
            Query::Segment { target, from, to } => {
                Outcome::Segment(self.aabb(target)?.find_intersects_segment(*from, *to))
            }
            Query::Ray { target, from, dir } => {
                Outcome::Ray(self.aabb(target)?.find_intersects_ray(*from, *dir))
            }
            Query::Support(target, dir) => Outcome::Point(self.aabb(target)?.support(*dir)),
            Query::Grow(target, by) => Outcome::Box(self.aabb(target)?.grow(*by)),
            Query::Expand(target, point) => Outcome::Box(self.aabb(target)?.expand(*point)),
            Query::Endpoint(target, index) => Outcome::Point(
                self.aabb(target)?
                    .try_endpoint(*index)
                    .with_context(|| format!("Endpoint query on box {:?}", target))?,
            ),
        };
        Ok(outcome)
    }

    pub fn evaluate_all(&self) -> anyhow::Result<Vec<(&Query, Outcome)>> {
        self.queries
            .iter()
            .map(|query| self.evaluate(query).map(|outcome| (query, outcome)))
            .collect()
    }
}
