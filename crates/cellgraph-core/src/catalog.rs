//! Built-in shape catalog: category colors, vendor icon entries, general shape templates,
//! container presets and edge routing templates.
//!
//! All tables are immutable. [`Catalog::builtin`] builds the lookup indexes once per process
//! and hands out a shared reference.

use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// A vendor icon: semantic key (`aws-lambda`), mxGraph primitive
/// (`mxgraph.aws4.lambda_function`) and category (`aws-compute`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub key: &'static str,
    pub primitive: &'static str,
    pub category: &'static str,
}

const fn entry(key: &'static str, primitive: &'static str, category: &'static str) -> CatalogEntry {
    CatalogEntry {
        key,
        primitive,
        category,
    }
}

/// Fill, stroke, header size and dash flag of a swimlane container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerPreset {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub header_size: u32,
    pub dashed: bool,
}

const fn preset(
    fill: &'static str,
    stroke: &'static str,
    header_size: u32,
    dashed: bool,
) -> ContainerPreset {
    ContainerPreset {
        fill,
        stroke,
        header_size,
        dashed,
    }
}

/// Edge routing families understood by draw.io.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeRoute {
    #[default]
    Orthogonal,
    Elbow,
    Straight,
    Curved,
    EntityRelation,
}

impl EdgeRoute {
    pub const ALL: &'static [EdgeRoute] = &[
        EdgeRoute::Orthogonal,
        EdgeRoute::Elbow,
        EdgeRoute::Straight,
        EdgeRoute::Curved,
        EdgeRoute::EntityRelation,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "orthogonal" => Some(Self::Orthogonal),
            "elbow" => Some(Self::Elbow),
            "straight" => Some(Self::Straight),
            "curved" => Some(Self::Curved),
            "entity" | "entity-relation" => Some(Self::EntityRelation),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Orthogonal => "orthogonal",
            Self::Elbow => "elbow",
            Self::Straight => "straight",
            Self::Curved => "curved",
            Self::EntityRelation => "entity",
        }
    }

    /// Style prefix for the route; `straight` is draw.io's default and has none.
    pub fn template(self) -> &'static str {
        match self {
            Self::Orthogonal => "edgeStyle=orthogonalEdgeStyle;",
            Self::Elbow => "edgeStyle=elbowEdgeStyle;",
            Self::Straight => "",
            Self::Curved => "curved=1;",
            Self::EntityRelation => "edgeStyle=entityRelationEdgeStyle;",
        }
    }
}

pub const DEFAULT_AWS_COLOR: &str = "#232F3E";
pub const DEFAULT_GCP_COLOR: &str = "#4285F4";
pub const DEFAULT_GENERAL_SHAPE: &str = "box";

const CATEGORY_COLORS: &[(&str, &str)] = &[
    ("aws-compute", "#ED7100"),
    ("aws-networking", "#8C4FFF"),
    ("aws-database", "#C925D1"),
    ("aws-storage", "#7AA116"),
    ("aws-security", "#DD344C"),
    ("aws-general", "#232F3E"),
    ("aws-management", "#E7157B"),
    ("aws-analytics", "#8C4FFF"),
    ("aws-app-integration", "#E7157B"),
    ("aws-ml", "#01A88D"),
    ("aws-containers", "#ED7100"),
    ("aws-devtools", "#C7131F"),
    ("azure-compute", "#0078D4"),
    ("azure-networking", "#0078D4"),
    ("azure-database", "#0078D4"),
    ("azure-storage", "#0078D4"),
    ("gcp-compute", "#4285F4"),
    ("gcp-networking", "#4285F4"),
    ("gcp-database", "#4285F4"),
    ("gcp-storage", "#4285F4"),
];

const ENTRIES: &[CatalogEntry] = &[
    // AWS Compute
    entry("aws-ec2", "mxgraph.aws4.instance2", "aws-compute"),
    entry("aws-lambda", "mxgraph.aws4.lambda_function", "aws-compute"),
    entry("aws-fargate", "mxgraph.aws4.fargate", "aws-compute"),
    entry("aws-batch", "mxgraph.aws4.batch", "aws-compute"),
    entry("aws-lightsail", "mxgraph.aws4.lightsail", "aws-compute"),
    entry("aws-beanstalk", "mxgraph.aws4.elastic_beanstalk", "aws-compute"),
    entry("aws-autoscaling", "mxgraph.aws4.auto_scaling2", "aws-compute"),
    // AWS Containers
    entry("aws-ecs", "mxgraph.aws4.ecs", "aws-containers"),
    entry("aws-eks", "mxgraph.aws4.eks", "aws-containers"),
    entry("aws-ecr", "mxgraph.aws4.ecr", "aws-containers"),
    // AWS Networking
    entry("aws-vpc", "mxgraph.aws4.virtual_private_cloud_vpc", "aws-networking"),
    entry("aws-igw", "mxgraph.aws4.internet_gateway", "aws-networking"),
    entry("aws-nat", "mxgraph.aws4.nat_gateway", "aws-networking"),
    entry("aws-route53", "mxgraph.aws4.route_53", "aws-networking"),
    entry("aws-cloudfront", "mxgraph.aws4.cloudfront", "aws-networking"),
    entry("aws-alb", "mxgraph.aws4.application_load_balancer", "aws-networking"),
    entry("aws-nlb", "mxgraph.aws4.network_load_balancer", "aws-networking"),
    entry("aws-api-gw", "mxgraph.aws4.api_gateway", "aws-networking"),
    entry("aws-api-gateway", "mxgraph.aws4.api_gateway", "aws-networking"),
    entry("aws-direct-connect", "mxgraph.aws4.direct_connect", "aws-networking"),
    entry("aws-transit-gw", "mxgraph.aws4.transit_gateway", "aws-networking"),
    entry("aws-vpn-gw", "mxgraph.aws4.vpn_gateway", "aws-networking"),
    entry("aws-endpoints", "mxgraph.aws4.endpoints", "aws-networking"),
    entry("aws-global-accelerator", "mxgraph.aws4.global_accelerator", "aws-networking"),
    entry("aws-elb", "mxgraph.aws4.elastic_load_balancing", "aws-networking"),
    // AWS Database
    entry("aws-rds", "mxgraph.aws4.rds_instance", "aws-database"),
    entry("aws-aurora", "mxgraph.aws4.aurora", "aws-database"),
    entry("aws-dynamodb", "mxgraph.aws4.dynamodb", "aws-database"),
    entry("aws-elasticache", "mxgraph.aws4.elasticache_cache_node", "aws-database"),
    entry("aws-neptune", "mxgraph.aws4.neptune", "aws-database"),
    entry("aws-redshift", "mxgraph.aws4.redshift", "aws-database"),
    entry("aws-documentdb", "mxgraph.aws4.documentdb_with_mongodb_compatibility", "aws-database"),
    // AWS Storage
    entry("aws-s3", "mxgraph.aws4.bucket", "aws-storage"),
    entry("aws-ebs", "mxgraph.aws4.volume", "aws-storage"),
    entry("aws-efs", "mxgraph.aws4.file_system", "aws-storage"),
    entry("aws-fsx", "mxgraph.aws4.fsx", "aws-storage"),
    entry("aws-backup", "mxgraph.aws4.backup", "aws-storage"),
    // AWS Security
    entry("aws-iam", "mxgraph.aws4.iam", "aws-security"),
    entry("aws-cognito", "mxgraph.aws4.cognito", "aws-security"),
    entry("aws-waf", "mxgraph.aws4.waf", "aws-security"),
    entry("aws-shield", "mxgraph.aws4.shield", "aws-security"),
    entry("aws-guardduty", "mxgraph.aws4.guardduty", "aws-security"),
    entry("aws-kms", "mxgraph.aws4.kms", "aws-security"),
    entry("aws-secrets-manager", "mxgraph.aws4.secrets_manager", "aws-security"),
    entry("aws-acm", "mxgraph.aws4.certificate_manager_3", "aws-security"),
    // AWS General
    entry("aws-users", "mxgraph.aws4.users", "aws-general"),
    entry("aws-client", "mxgraph.aws4.client", "aws-general"),
    entry("aws-cloud", "mxgraph.aws4.aws_cloud", "aws-general"),
    entry("aws-internet", "mxgraph.aws4.internet", "aws-general"),
    entry("aws-office", "mxgraph.aws4.office_building", "aws-general"),
    entry("aws-mobile-client", "mxgraph.aws4.mobile_client", "aws-general"),
    // AWS Management
    entry("aws-cloudwatch", "mxgraph.aws4.cloudwatch_2", "aws-management"),
    entry("aws-cloudformation", "mxgraph.aws4.cloudformation", "aws-management"),
    entry("aws-config", "mxgraph.aws4.config", "aws-management"),
    entry("aws-cloudtrail", "mxgraph.aws4.cloudtrail", "aws-management"),
    entry("aws-systems-manager", "mxgraph.aws4.systems_manager", "aws-management"),
    // AWS App Integration
    entry("aws-sqs", "mxgraph.aws4.sqs", "aws-app-integration"),
    entry("aws-sns", "mxgraph.aws4.sns", "aws-app-integration"),
    entry("aws-ses", "mxgraph.aws4.simple_email_service", "aws-app-integration"),
    entry("aws-eventbridge", "mxgraph.aws4.eventbridge", "aws-app-integration"),
    entry("aws-step-functions", "mxgraph.aws4.step_functions", "aws-app-integration"),
    // AWS Analytics
    entry("aws-athena", "mxgraph.aws4.athena", "aws-analytics"),
    entry("aws-kinesis", "mxgraph.aws4.kinesis", "aws-analytics"),
    entry("aws-glue", "mxgraph.aws4.glue", "aws-analytics"),
    entry("aws-quicksight", "mxgraph.aws4.quicksight", "aws-analytics"),
    // AWS ML
    entry("aws-sagemaker", "mxgraph.aws4.sagemaker", "aws-ml"),
    entry("aws-bedrock", "mxgraph.aws4.bedrock", "aws-ml"),
    entry("aws-rekognition", "mxgraph.aws4.rekognition", "aws-ml"),
    // GCP
    entry("gcp-compute-engine", "mxgraph.gcp2.compute_engine", "gcp-compute"),
    entry("gcp-cloud-functions", "mxgraph.gcp2.cloud_functions", "gcp-compute"),
    entry("gcp-cloud-run", "mxgraph.gcp2.cloud_run", "gcp-compute"),
    entry("gcp-gke", "mxgraph.gcp2.google_kubernetes_engine", "gcp-compute"),
    entry("gcp-cloud-sql", "mxgraph.gcp2.cloud_sql", "gcp-database"),
    entry("gcp-bigquery", "mxgraph.gcp2.bigquery", "gcp-database"),
    entry("gcp-firestore", "mxgraph.gcp2.firestore", "gcp-database"),
    entry("gcp-spanner", "mxgraph.gcp2.spanner", "gcp-database"),
    entry("gcp-cloud-storage", "mxgraph.gcp2.cloud_storage", "gcp-storage"),
    entry("gcp-pubsub", "mxgraph.gcp2.cloud_pubsub", "gcp-networking"),
    entry("gcp-vpc", "mxgraph.gcp2.virtual_private_cloud", "gcp-networking"),
    entry("gcp-cloud-cdn", "mxgraph.gcp2.cloud_cdn", "gcp-networking"),
    entry("gcp-cloud-dns", "mxgraph.gcp2.cloud_dns", "gcp-networking"),
    entry("gcp-load-balancing", "mxgraph.gcp2.cloud_load_balancing", "gcp-networking"),
];

const GENERAL_SHAPES: &[(&str, &str)] = &[
    ("box", "rounded=1;whiteSpace=wrap;html=1;"),
    ("rect", "whiteSpace=wrap;html=1;"),
    ("diamond", "rhombus;whiteSpace=wrap;html=1;"),
    ("circle", "ellipse;whiteSpace=wrap;html=1;aspect=fixed;"),
    (
        "cylinder",
        "shape=cylinder3;whiteSpace=wrap;html=1;boundedLbl=1;backgroundOutline=1;size=15;",
    ),
    ("cloud", "ellipse;shape=cloud;whiteSpace=wrap;html=1;"),
    ("document", "shape=document;whiteSpace=wrap;html=1;"),
    (
        "parallelogram",
        "shape=parallelogram;perimeter=parallelogramPerimeter;whiteSpace=wrap;html=1;",
    ),
    (
        "hexagon",
        "shape=hexagon;perimeter=hexagonPerimeter2;whiteSpace=wrap;html=1;",
    ),
    ("person", "shape=mxgraph.basic.person;whiteSpace=wrap;html=1;"),
    ("start-end", "rounded=1;whiteSpace=wrap;html=1;arcSize=50;"),
    (
        "table",
        "shape=table;startSize=30;container=1;collapsible=0;childLayout=tableLayout;fixedRows=1;rowLines=1;fontStyle=1;strokeColor=#6c8ebf;fillColor=#dae8fc;",
    ),
    // Network
    ("server", "shape=mxgraph.cisco.servers.standard_server;html=1;"),
    ("router", "shape=mxgraph.cisco.routers.router;html=1;"),
    ("switch", "shape=mxgraph.cisco.switches.layer_3_switch;html=1;"),
    ("firewall", "shape=mxgraph.cisco.firewalls.firewall;html=1;"),
    ("pc", "shape=mxgraph.cisco.computers_and_peripherals.pc;html=1;"),
];

const CONTAINER_PRESETS: &[(&str, ContainerPreset)] = &[
    ("aws-vpc", preset("#E8F5E9", "#388E3C", 30, false)),
    ("aws-az", preset("#E3F2FD", "#1565C0", 25, true)),
    ("aws-subnet-public", preset("#FFF3E0", "#E65100", 22, false)),
    ("aws-subnet-private-app", preset("#FCE4EC", "#C62828", 22, false)),
    ("aws-subnet-private-data", preset("#F3E5F5", "#6A1B9A", 22, false)),
];

/// Preset used when a container names none (or an unknown one).
pub const DEFAULT_CONTAINER: ContainerPreset = preset("#E8F5E9", "#388E3C", 30, false);

#[derive(Debug)]
pub struct Catalog {
    colors: FxHashMap<&'static str, &'static str>,
    entries: FxHashMap<&'static str, &'static CatalogEntry>,
    by_primitive: FxHashMap<&'static str, &'static CatalogEntry>,
    shapes: FxHashMap<&'static str, &'static str>,
    presets: FxHashMap<&'static str, ContainerPreset>,
}

impl Catalog {
    pub fn builtin() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(Catalog::build)
    }

    fn build() -> Self {
        let mut by_primitive: FxHashMap<&'static str, &'static CatalogEntry> =
            FxHashMap::default();
        for e in ENTRIES {
            // Several keys may share a primitive (`aws-api-gw`, `aws-api-gateway`); the first
            // one in table order decides its color.
            by_primitive.entry(e.primitive).or_insert(e);
        }
        Self {
            colors: CATEGORY_COLORS.iter().copied().collect(),
            entries: ENTRIES.iter().map(|e| (e.key, e)).collect(),
            by_primitive,
            shapes: GENERAL_SHAPES.iter().copied().collect(),
            presets: CONTAINER_PRESETS.iter().copied().collect(),
        }
    }

    pub fn entry(&self, key: &str) -> Option<&'static CatalogEntry> {
        self.entries.get(key).copied()
    }

    pub fn category_color(&self, category: &str) -> Option<&'static str> {
        self.colors.get(category).copied()
    }

    /// Color of the category of the first entry using `primitive`.
    pub fn primitive_color(&self, primitive: &str) -> Option<&'static str> {
        let e = self.by_primitive.get(primitive)?;
        self.category_color(e.category)
    }

    pub fn general_shape(&self, name: &str) -> Option<&'static str> {
        self.shapes.get(name).copied()
    }

    pub fn container_preset(&self, name: &str) -> Option<ContainerPreset> {
        self.presets.get(name).copied()
    }

    /// Vendor entries in table order.
    pub fn entries(&self) -> impl Iterator<Item = &'static CatalogEntry> {
        ENTRIES.iter()
    }

    /// General shape templates in table order.
    pub fn general_shapes(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        GENERAL_SHAPES.iter().copied()
    }

    pub fn container_presets(&self) -> impl Iterator<Item = (&'static str, ContainerPreset)> {
        CONTAINER_PRESETS.iter().copied()
    }

    pub fn categories(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        CATEGORY_COLORS.iter().copied()
    }

    /// Entries for a listing filter, sorted by key.
    ///
    /// `filter` is first treated as a key prefix (`aws` matches `aws-*`); if that matches
    /// nothing it is matched against the start of each entry's category (`aws-comp`).
    pub fn entries_matching(&self, filter: &str) -> Vec<&'static CatalogEntry> {
        let prefix = format!("{filter}-");
        let mut out: Vec<&'static CatalogEntry> =
            ENTRIES.iter().filter(|e| e.key.starts_with(&prefix)).collect();
        if out.is_empty() {
            out = ENTRIES
                .iter()
                .filter(|e| e.category.starts_with(filter))
                .collect();
        }
        out.sort_by_key(|e| e.key);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_has_a_known_category() {
        let catalog = Catalog::builtin();
        for e in catalog.entries() {
            assert!(
                catalog.category_color(e.category).is_some(),
                "{} has unknown category {}",
                e.key,
                e.category
            );
        }
    }

    #[test]
    fn keys_are_unique() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.entries.len(), ENTRIES.len());
    }

    #[test]
    fn shared_primitive_resolves_to_first_entry() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.primitive_color("mxgraph.aws4.api_gateway"),
            Some("#8C4FFF")
        );
        assert_eq!(catalog.primitive_color("mxgraph.aws4.nope"), None);
    }

    #[test]
    fn listing_falls_back_to_category_prefix() {
        let catalog = Catalog::builtin();
        let gcp = catalog.entries_matching("gcp");
        assert_eq!(gcp.len(), 14);
        assert!(gcp.windows(2).all(|w| w[0].key < w[1].key));

        let compute = catalog.entries_matching("aws-comp");
        assert!(!compute.is_empty());
        assert!(compute.iter().all(|e| e.category == "aws-compute"));

        assert!(catalog.entries_matching("azure").is_empty());
    }

    #[test]
    fn edge_route_names() {
        assert_eq!(EdgeRoute::from_name("entity-relation"), Some(EdgeRoute::EntityRelation));
        assert_eq!(EdgeRoute::from_name("entity"), Some(EdgeRoute::EntityRelation));
        assert_eq!(EdgeRoute::from_name("zigzag"), None);
        for route in EdgeRoute::ALL {
            assert_eq!(EdgeRoute::from_name(route.name()), Some(*route));
        }
    }
}
