use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Horizontal gap between a gene's right edge and the point its connectors attach to.
const GENE_ARROW_OFFSET: f64 = 5.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Renderable entity kinds. Snapshots may spell them with or without the
/// `Renderable` prefix used by the diagram layout files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    #[serde(alias = "RenderableComplex")]
    Complex,
    #[serde(alias = "RenderableProtein")]
    Protein,
    #[serde(alias = "RenderableEntitySet")]
    EntitySet,
    #[serde(alias = "RenderableOverlappedEntitySet")]
    OverlappedEntitySet,
    /// Generic physical entity with no more specific layout class.
    #[serde(alias = "RenderableEntity")]
    Entity,
    #[serde(alias = "RenderableChemical")]
    Chemical,
    #[serde(alias = "RenderableCompartment")]
    Compartment,
    #[serde(alias = "RenderableProcessNode")]
    ProcessNode,
    #[serde(alias = "RenderableGene")]
    Gene,
    #[serde(alias = "RenderableFailed")]
    Failed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    pub reactome_id: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub position: Point,
    pub size: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub crossed: bool,
    #[serde(default)]
    pub lof: bool,
    #[serde(default)]
    pub grayed: bool,
}

impl Entity {
    pub fn new(
        id: impl Into<String>,
        reactome_id: impl Into<String>,
        kind: EntityKind,
        position: Point,
        size: Size,
    ) -> Self {
        Self {
            id: id.into(),
            reactome_id: reactome_id.into(),
            kind,
            position,
            size,
            text: None,
            crossed: false,
            lof: false,
            grayed: false,
        }
    }

    /// Point that connectors attach to.
    ///
    /// Genes are drawn as a line with an arrow rather than a box, so their
    /// connectors meet just past the right edge.
    pub fn visual_center(&self) -> Point {
        match self.kind {
            EntityKind::Gene => Point {
                x: self.position.x + self.size.width + GENE_ARROW_OFFSET,
                y: self.position.y + self.size.height / 2.0,
            },
            _ => Point {
                x: self.position.x + self.size.width / 2.0,
                y: self.position.y + self.size.height / 2.0,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Role {
    Input,
    Output,
    Activator,
    Catalyst,
    Inhibitor,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Input => "Input",
            Role::Output => "Output",
            Role::Activator => "Activator",
            Role::Catalyst => "Catalyst",
            Role::Inhibitor => "Inhibitor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = LayoutError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "Input" => Ok(Role::Input),
            "Output" => Ok(Role::Output),
            "Activator" => Ok(Role::Activator),
            "Catalyst" => Ok(Role::Catalyst),
            "Inhibitor" => Ok(Role::Inhibitor),
            other => Err(LayoutError::UnknownRole(other.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Reaction kinds. Tags outside the known set are kept verbatim so they can
/// still be used as a marker name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReactionKind {
    Association,
    Dissociation,
    Binding,
    Transition,
    OmittedProcess,
    Uncertain,
    Missing,
    Other(String),
}

impl ReactionKind {
    pub fn as_str(&self) -> &str {
        match self {
            ReactionKind::Association => "Association",
            ReactionKind::Dissociation => "Dissociation",
            ReactionKind::Binding => "Binding",
            ReactionKind::Transition => "Transition",
            ReactionKind::OmittedProcess => "Omitted Process",
            ReactionKind::Uncertain => "Uncertain",
            ReactionKind::Missing => "missing",
            ReactionKind::Other(tag) => tag,
        }
    }
}

impl From<String> for ReactionKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Association" => ReactionKind::Association,
            "Dissociation" => ReactionKind::Dissociation,
            "Binding" => ReactionKind::Binding,
            "Transition" => ReactionKind::Transition,
            "Omitted Process" => ReactionKind::OmittedProcess,
            "Uncertain" => ReactionKind::Uncertain,
            "missing" => ReactionKind::Missing,
            _ => ReactionKind::Other(value),
        }
    }
}

impl From<&str> for ReactionKind {
    fn from(value: &str) -> Self {
        ReactionKind::from(value.to_string())
    }
}

impl From<ReactionKind> for String {
    fn from(kind: ReactionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entity's participation in a reaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleEdge {
    pub entity_id: String,
    pub role: Role,
    #[serde(default)]
    pub base: Vec<Point>,
}

impl RoleEdge {
    pub fn new(entity_id: impl Into<String>, role: Role, base: Vec<Point>) -> Self {
        Self {
            entity_id: entity_id.into(),
            role,
            base,
        }
    }

    pub fn has_curated_path(&self) -> bool {
        !self.base.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub reactome_id: String,
    #[serde(rename = "type")]
    pub kind: ReactionKind,
    pub center: Point,
    #[serde(default)]
    pub base: Vec<Point>,
    #[serde(default)]
    pub nodes: Vec<RoleEdge>,
    #[serde(default, rename = "failedReaction")]
    pub failed: bool,
    #[serde(default)]
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Reaction {
    pub fn new(reactome_id: impl Into<String>, kind: ReactionKind, center: Point) -> Self {
        Self {
            reactome_id: reactome_id.into(),
            kind,
            center,
            base: Vec::new(),
            nodes: Vec::new(),
            failed: false,
            class: String::new(),
            description: None,
        }
    }

    pub fn with_base(mut self, base: Vec<Point>) -> Self {
        self.base = base;
        self
    }

    pub fn with_node(mut self, node: RoleEdge) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }
}

/// Read-only queries the layout core needs from a loaded diagram.
pub trait PathwayGraph {
    fn entities(&self) -> &[Entity];

    fn reactions(&self) -> &[Reaction];

    fn entity(&self, id: &str) -> Option<&Entity>;

    /// Every entity drawn for a biological object; one object may appear in
    /// several places on the same diagram.
    fn entities_by_reactome_id(&self, reactome_id: &str) -> Vec<&Entity>;

    fn entities_in_reaction(&self, reaction: &Reaction) -> Vec<&Entity> {
        reaction
            .nodes
            .iter()
            .filter_map(|node| self.entity(&node.entity_id))
            .collect()
    }
}

/// Serialized form of a diagram as produced by the diagram loader.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PathwaySnapshot {
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

/// In-memory diagram with id and reactome-id indexes.
#[derive(Clone, Debug)]
pub struct PathwayModel {
    entities: Vec<Entity>,
    reactions: Vec<Reaction>,
    by_id: HashMap<String, usize>,
    by_reactome_id: HashMap<String, Vec<usize>>,
}

impl PathwayModel {
    pub fn new(entities: Vec<Entity>, reactions: Vec<Reaction>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(entities.len());
        let mut by_reactome_id: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, entity) in entities.iter().enumerate() {
            if by_id.insert(entity.id.clone(), index).is_some() {
                return Err(LayoutError::DuplicateEntity(entity.id.clone()));
            }
            by_reactome_id
                .entry(entity.reactome_id.clone())
                .or_default()
                .push(index);
        }

        for reaction in &reactions {
            if let Some(node) = reaction
                .nodes
                .iter()
                .find(|node| !by_id.contains_key(&node.entity_id))
            {
                return Err(LayoutError::UnknownEntity(node.entity_id.clone()));
            }
        }

        tracing::debug!(
            entities = entities.len(),
            reactions = reactions.len(),
            "loaded pathway model"
        );
        Ok(Self {
            entities,
            reactions,
            by_id,
            by_reactome_id,
        })
    }
}

impl TryFrom<PathwaySnapshot> for PathwayModel {
    type Error = LayoutError;

    fn try_from(snapshot: PathwaySnapshot) -> Result<Self> {
        PathwayModel::new(snapshot.entities, snapshot.reactions)
    }
}

impl PathwayGraph for PathwayModel {
    fn entities(&self) -> &[Entity] {
        &self.entities
    }

    fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    fn entity(&self, id: &str) -> Option<&Entity> {
        self.by_id.get(id).map(|&index| &self.entities[index])
    }

    fn entities_by_reactome_id(&self, reactome_id: &str) -> Vec<&Entity> {
        self.by_reactome_id
            .get(reactome_id)
            .map(|indexes| indexes.iter().map(|&index| &self.entities[index]).collect())
            .unwrap_or_default()
    }
}
