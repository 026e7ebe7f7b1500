//! Static checks over a catalog's scene graph.
//!
//! Unresolved choice targets are legal content: at runtime they route to the
//! bad ending. The reachability analysis follows the same rule, so they are
//! reported as warnings and treated as edges into the bad ending.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use crate::catalog::ContentCatalog;
use crate::id::{ItemId, SceneId};

/// How serious an [`IntegrityIssue`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The content is broken.
    Error,
    /// The content works but is probably not what the author meant.
    Warning,
}

/// What an [`IntegrityIssue`] is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    /// A scene, or the source scene of a routing rule.
    Scene(SceneId),
    /// An item definition.
    Item(ItemId),
}

impl Subject {
    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Scene(id) => id.as_str(),
            Self::Item(id) => id.as_str(),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scene(id) => write!(f, "{id}"),
            Self::Item(id) => write!(f, "item {id}"),
        }
    }
}

/// A problem found while checking content.
#[derive(Debug, Clone)]
pub struct IntegrityIssue {
    /// The scene or item the issue concerns.
    pub subject: Subject,
    /// A human-readable description of the issue.
    pub message: String,
    /// Error or warning.
    pub severity: Severity,
}

impl IntegrityIssue {
    /// Whether this issue is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{level}: {}: {}", self.subject, self.message)
    }
}

/// Check a catalog for dangling references and dead ends.
///
/// Errors: a granted item that is not in the item table, or a scene
/// reachable from the start that can never reach a terminal scene.
/// Warnings: a choice target with no scene, or a scene unreachable from the
/// start.
pub fn check_content(catalog: &ContentCatalog) -> Vec<IntegrityIssue> {
    check_content_with(catalog, &[])
}

/// [`check_content`] with additional `(from, to)` edges, for routing rules
/// that live outside the catalog.
pub fn check_content_with(
    catalog: &ContentCatalog,
    extra_edges: &[(SceneId, SceneId)],
) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();

    for scene in catalog.scenes() {
        for item in &scene.grants {
            if catalog.get_item(item.as_str()).is_none() {
                issues.push(IntegrityIssue {
                    subject: Subject::Scene(scene.id.clone()),
                    message: format!("grants unknown item \"{item}\""),
                    severity: Severity::Error,
                });
            }
        }
        for choice in &scene.choices {
            if !catalog.has_scene(choice.target.as_str()) {
                issues.push(IntegrityIssue {
                    subject: Subject::Scene(scene.id.clone()),
                    message: format!(
                        "choice \"{}\" targets unknown scene \"{}\" (routes to {})",
                        choice.label,
                        choice.target,
                        catalog.bad_ending()
                    ),
                    severity: Severity::Warning,
                });
            }
        }
    }

    let graph = Graph {
        catalog,
        extra_edges,
    };
    let reachable = graph.reachable_from_start();
    let finishing = graph.can_finish();

    for id in catalog.all_scene_ids() {
        if !reachable.contains(id) {
            issues.push(IntegrityIssue {
                subject: Subject::Scene(id.clone()),
                message: format!("unreachable from {}", catalog.start()),
                severity: Severity::Warning,
            });
        } else if !finishing.contains(id) {
            issues.push(IntegrityIssue {
                subject: Subject::Scene(id.clone()),
                message: "cannot reach any ending".to_string(),
                severity: Severity::Error,
            });
        }
    }

    issues
}

struct Graph<'a> {
    catalog: &'a ContentCatalog,
    extra_edges: &'a [(SceneId, SceneId)],
}

impl<'a> Graph<'a> {
    /// Outgoing edges after applying the unknown-target fallback.
    fn successors(&self, id: &SceneId) -> Vec<&'a SceneId> {
        let catalog = self.catalog;
        let mut next: Vec<&'a SceneId> = match catalog.get_scene(id.as_str()) {
            Some(scene) => scene
                .choices
                .iter()
                .map(|c| {
                    if catalog.has_scene(c.target.as_str()) {
                        &c.target
                    } else {
                        catalog.bad_ending()
                    }
                })
                .collect(),
            None => Vec::new(),
        };
        next.extend(
            self.extra_edges
                .iter()
                .filter(|(from, to)| from == id && catalog.has_scene(to.as_str()))
                .map(|(_, to)| to),
        );
        next
    }

    fn reachable_from_start(&self) -> HashSet<SceneId> {
        let start = self.catalog.start();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(start.clone());
        queue.push_back(start.clone());

        while let Some(id) = queue.pop_front() {
            for next in self.successors(&id) {
                if seen.insert(next.clone()) {
                    queue.push_back(next.clone());
                }
            }
        }
        seen
    }

    /// Scenes from which some path reaches a terminal scene.
    fn can_finish(&self) -> HashSet<SceneId> {
        let mut predecessors: HashMap<&SceneId, Vec<&SceneId>> = HashMap::new();
        for id in self.catalog.all_scene_ids() {
            for next in self.successors(id) {
                predecessors.entry(next).or_default().push(id);
            }
        }

        let mut done: HashSet<SceneId> = HashSet::new();
        let mut queue: VecDeque<&SceneId> = self
            .catalog
            .scenes()
            .filter(|s| s.is_terminal())
            .map(|s| &s.id)
            .collect();
        for id in &queue {
            done.insert((*id).clone());
        }

        while let Some(id) = queue.pop_front() {
            for prev in predecessors.get(id).into_iter().flatten() {
                if done.insert((*prev).clone()) {
                    queue.push_back(*prev);
                }
            }
        }
        done
    }
}
