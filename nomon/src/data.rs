//! Seed data: sample projects, the standards library tree, platform users
//! and stage frameworks. Stands in for backend fetches.

use std::collections::HashMap;

use nomon_core::catalog::{Catalog, LeafInfo, Node, NodeId};
use nomon_core::project::{
    Bundle, Collaborator, PlatformUser, Priority, Project, ProjectDocument, Stage, StageFramework,
    Todo, TodoStatus,
};

fn id(s: &str) -> NodeId {
    NodeId::new(s)
}

fn doc_info(country: &str, region: &str) -> LeafInfo {
    LeafInfo {
        country: Some(country.to_string()),
        region: Some(region.to_string()),
        ..LeafInfo::default()
    }
}

/// The standards library browsed by the bundle picker: UK, USA and EU
/// top-level folders with regulation documents beneath.
pub fn library_catalog() -> Catalog {
    Catalog::from_nodes(vec![
        Node::folder("uk", "UK Standards", None),
        Node::folder("usa", "USA Standards", None),
        Node::folder("eu", "EU Standards", None),
        Node::folder("uk-building-regs", "Building Regulations", Some(id("uk"))),
        Node::folder("uk-fire-safety", "Fire Safety", Some(id("uk"))),
        Node::folder("uk-sustainability", "Sustainability", Some(id("uk"))),
        Node::leaf(
            "part-a",
            "Part A - Structure",
            Some(id("uk-building-regs")),
            doc_info("UK", "England"),
        ),
        Node::leaf(
            "part-b",
            "Part B - Fire Safety",
            Some(id("uk-building-regs")),
            doc_info("UK", "England"),
        ),
        Node::leaf(
            "part-l",
            "Part L - Conservation of Fuel",
            Some(id("uk-building-regs")),
            doc_info("UK", "England"),
        ),
        Node::leaf(
            "part-m",
            "Part M - Access",
            Some(id("uk-building-regs")),
            doc_info("UK", "England"),
        ),
        Node::leaf(
            "part-o",
            "Part O - Overheating",
            Some(id("uk-building-regs")),
            doc_info("UK", "England"),
        ),
        Node::leaf(
            "bs-9991",
            "BS 9991 - Fire Safety Residential",
            Some(id("uk-fire-safety")),
            doc_info("UK", "National"),
        ),
        Node::leaf(
            "bs-9999",
            "BS 9999 - Fire Safety Non-Residential",
            Some(id("uk-fire-safety")),
            doc_info("UK", "National"),
        ),
        Node::leaf(
            "breeam",
            "BREEAM New Construction",
            Some(id("uk-sustainability")),
            doc_info("UK", "National"),
        ),
        Node::leaf(
            "passivhaus",
            "Passivhaus Standard",
            Some(id("uk-sustainability")),
            doc_info("UK", "International"),
        ),
        Node::folder("usa-ibc", "International Building Code", Some(id("usa"))),
        Node::folder("usa-ada", "ADA Compliance", Some(id("usa"))),
        Node::leaf(
            "ibc-2021",
            "IBC 2021",
            Some(id("usa-ibc")),
            doc_info("USA", "National"),
        ),
        Node::leaf(
            "ibc-fire",
            "IBC Fire Code",
            Some(id("usa-ibc")),
            doc_info("USA", "National"),
        ),
        Node::leaf(
            "ada-guidelines",
            "ADA Guidelines",
            Some(id("usa-ada")),
            doc_info("USA", "National"),
        ),
        Node::leaf(
            "eu-cpd",
            "Construction Products Directive",
            Some(id("eu")),
            doc_info("EU", "European"),
        ),
        Node::leaf(
            "eu-epbd",
            "Energy Performance of Buildings",
            Some(id("eu")),
            doc_info("EU", "European"),
        ),
    ])
}

/// Bundles offered by the library, keyed off the same ids the picker
/// selects.
pub fn available_bundles() -> Vec<Bundle> {
    let uk = |id: &str, name: &str, documents: u32| Bundle {
        id: id.to_string(),
        name: name.to_string(),
        documents,
        country: Some("UK".to_string()),
        region: Some("Europe".to_string()),
    };
    let usa = |id: &str, name: &str, documents: u32| Bundle {
        id: id.to_string(),
        name: name.to_string(),
        documents,
        country: Some("USA".to_string()),
        region: Some("North America".to_string()),
    };
    vec![
        uk("ukad", "UK Approved Documents", 25),
        uk("adb", "Approved Document B & Referenced Standards", 95),
        uk("adc", "Approved Document C & Referenced Standards", 34),
        uk("adm", "Approved Document M & Referenced Standards", 17),
        uk("cibse", "CIBSE Guides", 33),
        uk("bsria", "BSRIA Rule of Thumb", 4),
        uk("fire", "Fire Safety Engineering Solution Pack", 7),
        uk("htm", "Health Technical Memoranda (HTM) Suite", 45),
        usa("ibc", "International Building Code", 12),
        usa("nfpa", "NFPA Standards", 28),
        usa("ashrae", "ASHRAE Standards", 15),
    ]
}

fn collaborator(
    id: u64,
    name: &str,
    initials: &str,
    color: &str,
    role: &str,
    permission: &str,
    is_owner: bool,
) -> Collaborator {
    Collaborator {
        id,
        name: name.to_string(),
        initials: initials.to_string(),
        color: color.to_string(),
        role: role.to_string(),
        permission: permission.to_string(),
        is_owner,
        role_filter_enabled: true,
    }
}

fn document(id: u64, name: &str, doc_type: &str, status: &str, version: &str, author: &str) -> ProjectDocument {
    ProjectDocument {
        id,
        name: name.to_string(),
        doc_type: doc_type.to_string(),
        status: status.to_string(),
        version: version.to_string(),
        author: author.to_string(),
    }
}

fn todo(id: u64, text: &str, priority: Priority, due: &str, assignee: Option<&str>) -> Todo {
    Todo {
        id,
        text: text.to_string(),
        priority,
        due: due.to_string(),
        assignee: assignee.map(str::to_string),
        status: TodoStatus::Pending,
        notes: None,
        created_at: None,
    }
}

/// Riverside Tower's seed file tree: a couple of discipline folders with
/// drawings and reports to browse.
fn riverside_files() -> Catalog {
    let pdf = |author: &str, version: &str| LeafInfo {
        file_type: Some("pdf".to_string()),
        size: Some("1.2 MB".to_string()),
        author: Some(author.to_string()),
        version: Some(version.to_string()),
        ..LeafInfo::default()
    };
    Catalog::from_nodes(vec![
        Node::folder("drawings", "Drawings", None),
        Node::folder("drawings-ga", "General Arrangement", Some(id("drawings"))),
        Node::folder("reports", "Reports", None),
        Node::leaf(
            "ga-101",
            "GA-101 Ground Floor Plan.pdf",
            Some(id("drawings-ga")),
            pdf("Architect", "Rev C"),
        ),
        Node::leaf(
            "ga-102",
            "GA-102 First Floor Plan.pdf",
            Some(id("drawings-ga")),
            pdf("Architect", "Rev C"),
        ),
        Node::leaf(
            "site-plan",
            "Site Plan.pdf",
            Some(id("drawings")),
            pdf("Architect", "Rev B"),
        ),
        Node::leaf(
            "fire-strategy",
            "Fire Strategy Report.pdf",
            Some(id("reports")),
            pdf("Fire Engineer", "Rev B"),
        ),
        Node::leaf(
            "das",
            "Design & Access Statement.pdf",
            Some(id("reports")),
            pdf("Design Team", "Rev D"),
        ),
    ])
}

/// The three seed projects shown on first launch.
pub fn sample_projects() -> Vec<Project> {
    let bundle = |id: &str, name: &str, documents: u32| Bundle {
        id: id.to_string(),
        name: name.to_string(),
        documents,
        country: None,
        region: None,
    };
    vec![
        Project {
            id: 1,
            name: "Riverside Tower".to_string(),
            building_type: "mixed".to_string(),
            building_subtype: vec![
                "residential".to_string(),
                "office".to_string(),
                "retail".to_string(),
            ],
            location: "London, UK".to_string(),
            address: "123 Thames Street, London, EC2A 1AB".to_string(),
            gia: "45,000 m²".to_string(),
            completion_date: "2026-12-31".to_string(),
            stage_framework: "riba".to_string(),
            current_stage: "3".to_string(),
            collaborators: vec![
                collaborator(1, "Chris Eliades", "CE", "#3B82F6", "architect", "admin", true),
                collaborator(2, "Panos Veranoudis", "PV", "#D97706", "structural", "full", false),
                collaborator(3, "Sarah Chen", "SC", "#EC4899", "fire", "edit", false),
                collaborator(4, "Mike Roberts", "MR", "#22C55E", "mep", "edit", false),
            ],
            project_documents: vec![
                document(1, "Design & Access Statement", "Report", "Current", "Rev D", "Design Team"),
                document(2, "GA Drawings - All Levels", "Drawing", "In Review", "Rev C", "Architect"),
                document(3, "Fire Strategy Report", "Technical Report", "Current", "Rev B", "Fire Engineer"),
                document(4, "Structural Calculations", "Calculations", "Approved", "Rev E", "Structural"),
                document(5, "M&E Specifications", "Specification", "Draft", "Rev A", "M&E"),
            ],
            applied_bundles: vec![
                bundle("ukad", "UK Approved Documents", 25),
                bundle("adb", "Approved Document B & Referenced Standards", 95),
                bundle("cibse", "CIBSE Guides", 33),
            ],
            personal_todos: vec![
                todo(1, "Review updated fire strategy section 4.2", Priority::High, "Today", None),
                todo(2, "Approve material submittal - cladding", Priority::Medium, "Tomorrow", None),
            ],
            global_todos: vec![
                todo(3, "Stage 3 report due for client review", Priority::High, "Fri", Some("Team")),
                todo(4, "Planning condition 7 discharge", Priority::Medium, "Mon", Some("Planning")),
            ],
            files: riverside_files(),
        },
        Project {
            id: 2,
            name: "Canada Life Building".to_string(),
            building_type: "commercial".to_string(),
            building_subtype: vec!["office".to_string()],
            location: "Manchester, UK".to_string(),
            address: "45 Deansgate, Manchester, M3 2BA".to_string(),
            gia: "28,500 m²".to_string(),
            completion_date: "2025-06-30".to_string(),
            stage_framework: "riba".to_string(),
            current_stage: "4".to_string(),
            collaborators: vec![collaborator(
                1, "Alex Morgan", "AM", "#6366F1", "architect", "admin", true,
            )],
            project_documents: Vec::new(),
            applied_bundles: Vec::new(),
            personal_todos: Vec::new(),
            global_todos: Vec::new(),
            files: Catalog::new(),
        },
        Project {
            id: 3,
            name: "CISCO Innovation Hub".to_string(),
            building_type: "commercial".to_string(),
            building_subtype: vec!["office".to_string()],
            location: "San Jose, USA".to_string(),
            address: "170 West Tasman Drive, San Jose, CA 95134".to_string(),
            gia: "15,000 m²".to_string(),
            completion_date: "2025-09-15".to_string(),
            stage_framework: "aia".to_string(),
            current_stage: "dd".to_string(),
            collaborators: vec![collaborator(
                1, "Jordan Smith", "JS", "#0EA5E9", "architect", "admin", true,
            )],
            project_documents: Vec::new(),
            applied_bundles: Vec::new(),
            personal_todos: Vec::new(),
            global_todos: Vec::new(),
            files: Catalog::new(),
        },
    ]
}

pub fn platform_users() -> Vec<PlatformUser> {
    let user = |id: u64, name: &str, email: &str, initials: &str, color: &str| PlatformUser {
        id,
        name: name.to_string(),
        email: email.to_string(),
        initials: initials.to_string(),
        color: color.to_string(),
    };
    vec![
        user(101, "David Park", "david.park@example.com", "DP", "#8B5CF6"),
        user(102, "Lisa Wong", "lisa.wong@example.com", "LW", "#F59E0B"),
        user(103, "James Taylor", "james.taylor@example.com", "JT", "#10B981"),
        user(104, "Emma Wilson", "emma.wilson@example.com", "EW", "#EC4899"),
    ]
}

/// Stage frameworks keyed by the ids projects reference.
pub fn stage_frameworks() -> HashMap<String, StageFramework> {
    let stage = |id: &str, name: &str| Stage {
        id: id.to_string(),
        name: name.to_string(),
    };
    let mut frameworks = HashMap::new();
    frameworks.insert(
        "riba".to_string(),
        StageFramework {
            name: "RIBA Plan of Work (UK)".to_string(),
            stages: vec![
                stage("0", "Strategic Definition"),
                stage("1", "Preparation & Briefing"),
                stage("2", "Concept Design"),
                stage("3", "Spatial Coordination"),
                stage("4", "Technical Design"),
                stage("5", "Manufacturing & Construction"),
                stage("6", "Handover"),
                stage("7", "Use"),
            ],
        },
    );
    frameworks.insert(
        "aia".to_string(),
        StageFramework {
            name: "AIA Phases (US)".to_string(),
            stages: vec![
                stage("pre", "Pre-Design"),
                stage("sd", "Schematic Design"),
                stage("dd", "Design Development"),
                stage("cd", "Construction Documents"),
                stage("bid", "Bidding & Negotiation"),
                stage("ca", "Construction Administration"),
                stage("post", "Post-Occupancy"),
            ],
        },
    );
    frameworks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_catalog_resolves_paths_and_leaves() {
        let library = library_catalog();
        let crumbs = library.path_to(Some(&id("uk-building-regs"))).unwrap();
        let names: Vec<&str> = crumbs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Root", "UK Standards", "Building Regulations"]);

        // every document in the tree is reachable from the root
        assert_eq!(library.leaves_under(None).unwrap().len(), 14);
        let folders = library.iter().filter(|n| n.is_folder()).count();
        assert_eq!(library.len(), folders + 14);
        assert_eq!(library.leaves_under(Some(&id("uk"))).unwrap().len(), 9);
    }

    #[test]
    fn sample_projects_seed_consistently() {
        let projects = sample_projects();
        assert_eq!(projects.len(), 3);

        let riverside = &projects[0];
        assert_eq!(riverside.collaborators.iter().filter(|c| c.is_owner).count(), 1);
        assert_eq!(riverside.applied_bundle_ids().len(), 3);

        // seeded bundles all come from the library's offering
        let available = available_bundles();
        for bundle in &riverside.applied_bundles {
            assert!(available.iter().any(|b| b.id == bundle.id));
        }
        assert!(!riverside.files.is_empty());

        // seeded todo ids obey the same cross-scope uniqueness as generated ones
        let mut todo_ids: Vec<u64> = riverside
            .personal_todos
            .iter()
            .chain(riverside.global_todos.iter())
            .map(|t| t.id)
            .collect();
        todo_ids.sort_unstable();
        todo_ids.dedup();
        assert_eq!(
            todo_ids.len(),
            riverside.personal_todos.len() + riverside.global_todos.len()
        );

        assert!(projects[1].files.is_empty());
    }

    #[test]
    fn platform_users_can_join_seeded_projects() {
        let mut projects = sample_projects();
        let riverside = &mut projects[0];
        let team_before = riverside.collaborators.len();

        for user in platform_users() {
            assert!(riverside.add_collaborator(&user));
        }
        assert_eq!(riverside.collaborators.len(), team_before + 4);

        // platform ids never collide with seeded collaborator ids
        let lisa = platform_users().into_iter().find(|u| u.id == 102).unwrap();
        assert!(!riverside.add_collaborator(&lisa));
    }

    #[test]
    fn frameworks_cover_every_project_reference() {
        let frameworks = stage_frameworks();
        for project in sample_projects() {
            let framework = frameworks
                .get(&project.stage_framework)
                .expect("project references a known framework");
            assert!(framework.stages.iter().any(|s| s.id == project.current_stage));
        }
    }
}
