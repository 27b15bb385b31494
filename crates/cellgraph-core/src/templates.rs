//! Built-in diagram templates, each expressed as a [`DiagramSpec`].

use crate::spec::{DiagramSpec, EdgeDescriptor, NodeDescriptor, NodeKind};
use crate::{Error, Result};
use indexmap::IndexMap;

pub type TemplateVars = IndexMap<String, String>;

#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub name: &'static str,
    pub description: &'static str,
    spec: fn(&TemplateVars) -> DiagramSpec,
}

impl Template {
    pub fn spec(&self, vars: &TemplateVars) -> DiagramSpec {
        (self.spec)(vars)
    }
}

pub const TEMPLATES: &[Template] = &[
    Template {
        name: "aws-3tier",
        description: "AWS 3-tier architecture (Route53, CloudFront, ALB, EC2, RDS, ElastiCache)",
        spec: aws_3tier,
    },
    Template {
        name: "aws-serverless",
        description: "AWS serverless (API Gateway, Lambda, DynamoDB, S3, SNS, Cognito)",
        spec: aws_serverless,
    },
    Template {
        name: "aws-vpc",
        description: "AWS VPC with 2 AZs, public/private/data subnets, NAT, IGW",
        spec: aws_vpc,
    },
    Template {
        name: "flowchart",
        description: "Simple flowchart: Start, Process, Decision, End",
        spec: flowchart,
    },
    Template {
        name: "erd",
        description: "3-table ERD with relationships",
        spec: erd,
    },
];

pub fn find(name: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.name == name)
}

pub fn spec_for(name: &str, vars: &TemplateVars) -> Result<DiagramSpec> {
    let Some(template) = find(name) else {
        return Err(Error::UnknownTemplate {
            name: name.to_string(),
            available: TEMPLATES
                .iter()
                .map(|t| t.name)
                .collect::<Vec<_>>()
                .join(", "),
        });
    };
    Ok(template.spec(vars))
}

/// Parses `key=value` pairs; items without `=` are ignored.
pub fn parse_vars<I, S>(items: I) -> TemplateVars
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .filter_map(|item| {
            let (k, v) = item.as_ref().split_once('=')?;
            Some((k.to_string(), v.to_string()))
        })
        .collect()
}

fn var<'a>(vars: &'a TemplateVars, key: &str, default: &'a str) -> &'a str {
    vars.get(key).map(String::as_str).unwrap_or(default)
}

fn icon(id: &str, label: &str, preset: &str) -> NodeDescriptor {
    NodeDescriptor::new(id)
        .label(label)
        .kind(NodeKind::Aws)
        .preset(preset)
}

fn container(id: &str, label: &str, preset: &str) -> NodeDescriptor {
    NodeDescriptor::new(id)
        .label(label)
        .kind(NodeKind::Container)
        .preset(preset)
}

fn link(id: &str, source: &str, target: &str, color: &str) -> EdgeDescriptor {
    EdgeDescriptor::new(id, source, target).color(color)
}

const ASG_STYLE: &str = "text;html=1;strokeColor=#ED7100;fillColor=none;align=center;verticalAlign=middle;whiteSpace=wrap;rounded=1;dashed=1;dashPattern=8 8;fontSize=10;fontColor=#ED7100;";

fn aws_3tier(vars: &TemplateVars) -> DiagramSpec {
    let region = var(vars, "region", "us-east-1");
    let app = var(vars, "app_name", "");
    let name = if app.is_empty() {
        "AWS 3-Tier Architecture".to_string()
    } else {
        format!("{app} - AWS 3-Tier Architecture")
    };

    let mut spec = DiagramSpec::new(name, 1600.0, 900.0)
        .node(
            icon("users", "Users", "aws-users")
                .at(80.0, 27.0)
                .size(55.0, 55.0),
        )
        .node(
            icon("r53", "Route 53", "aws-route53")
                .at(300.0, 30.0)
                .size(50.0, 50.0),
        )
        .node(
            icon("cf", "CloudFront\nDistribution", "aws-cloudfront")
                .at(530.0, 30.0)
                .size(50.0, 50.0),
        )
        .node(
            icon("igw", "Internet\nGateway", "aws-igw")
                .at(775.0, 30.0)
                .size(50.0, 50.0),
        )
        .node(
            icon("s3", "S3 Bucket\n(Static Assets)", "aws-s3")
                .fill("#3F8624")
                .at(1030.0, 30.0)
                .size(50.0, 50.0),
        )
        .node(
            container("vpc", "VPC (10.0.0.0/16)", "aws-vpc")
                .at(120.0, 100.0)
                .size(1360.0, 740.0),
        );

    for (i, az_x, suffix) in [(1, 30.0, 'a'), (2, 690.0, 'b')] {
        let az = format!("az{i}");
        let public = format!("pubsub{i}");
        let app_subnet = format!("privsub_app{i}");
        let data_subnet = format!("privsub_db{i}");

        spec.nodes.push(
            container(
                &az,
                &format!("Availability Zone {i} ({region}{suffix})"),
                "aws-az",
            )
            .parent("vpc")
            .at(az_x, 50.0)
            .size(620.0, 660.0),
        );

        spec.nodes.push(
            container(
                &public,
                &format!("Public Subnet (10.0.{i}.0/24)"),
                "aws-subnet-public",
            )
            .parent(&az)
            .at(20.0, 40.0)
            .size(580.0, 150.0),
        );
        spec.nodes.push(
            icon(&format!("nat{i}"), "NAT Gateway", "aws-nat")
                .parent(&public)
                .at(40.0, 40.0)
                .size(50.0, 50.0),
        );
        spec.nodes.push(
            icon(&format!("alb{i}"), "Application\nLoad Balancer", "aws-alb")
                .parent(&public)
                .at(250.0, 35.0)
                .size(60.0, 60.0),
        );

        let app_x = if i == 2 { 70.0 } else { 20.0 };
        spec.nodes.push(
            container(
                &app_subnet,
                &format!("Private Subnet - App (10.0.{}.0/24)", i + 2),
                "aws-subnet-private-app",
            )
            .parent(&az)
            .at(app_x, 220.0)
            .size(580.0, 170.0),
        );
        for (slot, ec2_x) in [('a', 160.0), ('b', 370.0)] {
            spec.nodes.push(
                icon(&format!("ec2_{i}{slot}"), "EC2 Instance\n(App Server)", "aws-ec2")
                    .parent(&app_subnet)
                    .at(ec2_x, 40.0)
                    .size(48.0, 48.0),
            );
        }
        spec.nodes.push(
            NodeDescriptor::new(format!("asg{i}"))
                .label("Auto Scaling Group")
                .style(ASG_STYLE)
                .parent(&app_subnet)
                .at(130.0, 105.0)
                .size(320.0, 25.0),
        );

        spec.nodes.push(
            container(
                &data_subnet,
                &format!("Private Subnet - Data (10.0.{}.0/24)", i + 4),
                "aws-subnet-private-data",
            )
            .parent(&az)
            .at(20.0, 420.0)
            .size(580.0, 210.0),
        );
        let (rds_label, cache_label) = if i == 1 {
            ("RDS Primary\n(MySQL/PostgreSQL)", "ElastiCache\n(Redis)")
        } else {
            ("RDS Standby\n(Multi-AZ)", "ElastiCache\nReplica")
        };
        spec.nodes.push(
            icon(&format!("rds{i}"), rds_label, "aws-rds")
                .parent(&data_subnet)
                .at(140.0, 40.0)
                .size(48.0, 48.0),
        );
        spec.nodes.push(
            icon(&format!("cache{i}"), cache_label, "aws-elasticache")
                .parent(&data_subnet)
                .at(380.0, 40.0)
                .size(48.0, 48.0),
        );
    }

    for (label, y, color) in [
        ("PRESENTATION TIER", 170.0, "#E65100"),
        ("APPLICATION TIER", 370.0, "#C62828"),
        ("DATA TIER", 570.0, "#6A1B9A"),
    ] {
        spec.nodes.push(
            NodeDescriptor::anonymous_text()
                .label(label)
                .font_color(color)
                .at(1500.0, y)
                .size(60.0, 120.0),
        );
    }

    let edges = [
        ("e1", "users", "r53", "#232F3E"),
        ("e2", "r53", "cf", "#232F3E"),
        ("e3", "cf", "igw", "#232F3E"),
        ("e4", "igw", "alb1", "#8C4FFF"),
        ("e5", "igw", "alb2", "#8C4FFF"),
        ("e6", "alb1", "ec2_1a", "#ED7100"),
        ("e7", "alb1", "ec2_1b", "#ED7100"),
        ("e8", "alb2", "ec2_2a", "#ED7100"),
        ("e9", "alb2", "ec2_2b", "#ED7100"),
        ("e10", "ec2_1a", "rds1", "#C925D1"),
        ("e11", "ec2_1b", "cache1", "#C925D1"),
        ("e12", "ec2_2a", "rds2", "#C925D1"),
        ("e13", "ec2_2b", "cache2", "#C925D1"),
    ];
    spec.edges
        .extend(edges.iter().map(|&(id, s, t, c)| link(id, s, t, c)));
    spec.edges.push(link("e3b", "cf", "s3", "#3F8624").dashed());
    spec.edges.push(
        link("e14", "rds1", "rds2", "#C925D1")
            .dashed()
            .label("Sync Replication"),
    );
    spec.edges.push(
        link("e15", "cache1", "cache2", "#C925D1")
            .dashed()
            .label("Replication"),
    );
    spec
}

fn aws_serverless(_vars: &TemplateVars) -> DiagramSpec {
    let nodes = [
        ("users", "Users", "aws-users", 50.0, 220.0, 55.0),
        ("cognito", "Cognito", "aws-cognito", 200.0, 220.0, 50.0),
        ("apigw", "API Gateway", "aws-api-gw", 370.0, 220.0, 50.0),
        ("lambda1", "Lambda\n(API)", "aws-lambda", 550.0, 120.0, 50.0),
        ("lambda2", "Lambda\n(Worker)", "aws-lambda", 550.0, 320.0, 50.0),
        ("dynamo", "DynamoDB", "aws-dynamodb", 750.0, 120.0, 50.0),
        ("s3", "S3 Bucket", "aws-s3", 750.0, 320.0, 50.0),
        ("sns", "SNS", "aws-sns", 950.0, 220.0, 50.0),
    ];
    let edges = [
        ("e1", "users", "cognito"),
        ("e2", "cognito", "apigw"),
        ("e3", "apigw", "lambda1"),
        ("e4", "apigw", "lambda2"),
        ("e5", "lambda1", "dynamo"),
        ("e6", "lambda2", "s3"),
        ("e7", "lambda1", "sns"),
        ("e8", "lambda2", "sns"),
    ];

    let mut spec = DiagramSpec::new("AWS Serverless", 1200.0, 600.0);
    spec.nodes.extend(
        nodes
            .iter()
            .map(|&(id, label, preset, x, y, size)| icon(id, label, preset).at(x, y).size(size, size)),
    );
    spec.edges
        .extend(edges.iter().map(|&(id, s, t)| link(id, s, t, "#232F3E")));
    spec
}

fn aws_vpc(vars: &TemplateVars) -> DiagramSpec {
    let region = var(vars, "region", "us-east-1");

    let mut spec = DiagramSpec::new("AWS VPC", 1200.0, 700.0)
        .node(
            icon("igw", "Internet\nGateway", "aws-igw")
                .at(550.0, 20.0)
                .size(50.0, 50.0),
        )
        .node(
            container("vpc", "VPC (10.0.0.0/16)", "aws-vpc")
                .at(50.0, 90.0)
                .size(1100.0, 560.0),
        );

    for (i, az_x, suffix) in [(1u32, 30.0, 'a'), (2, 560.0, 'b')] {
        let az = format!("az{i}");
        let public = format!("pub{i}");
        spec.nodes.push(
            container(&az, &format!("AZ {region}{suffix}"), "aws-az")
                .parent("vpc")
                .at(az_x, 40.0)
                .size(500.0, 490.0),
        );
        spec.nodes.push(
            container(
                &public,
                &format!("Public Subnet (10.0.{}.0/24)", i * 2 - 1),
                "aws-subnet-public",
            )
            .parent(&az)
            .at(20.0, 40.0)
            .size(460.0, 130.0),
        );
        spec.nodes.push(
            icon(&format!("nat{i}"), "NAT GW", "aws-nat")
                .parent(&public)
                .at(200.0, 40.0)
                .size(48.0, 48.0),
        );
        spec.nodes.push(
            container(
                &format!("priv{i}"),
                &format!("Private Subnet (10.0.{}.0/24)", i * 2),
                "aws-subnet-private-app",
            )
            .parent(&az)
            .at(20.0, 200.0)
            .size(460.0, 130.0),
        );
        spec.nodes.push(
            container(
                &format!("data{i}"),
                &format!("Data Subnet (10.0.{}.0/24)", i * 2 + 8),
                "aws-subnet-private-data",
            )
            .parent(&az)
            .at(20.0, 360.0)
            .size(460.0, 110.0),
        );
    }

    spec.edges.push(link("e_igw_pub1", "igw", "pub1", "#8C4FFF"));
    spec.edges.push(link("e_igw_pub2", "igw", "pub2", "#8C4FFF"));
    spec
}

fn flowchart(vars: &TemplateVars) -> DiagramSpec {
    let nodes = [
        ("start", "Start", "start-end", 300.0, 40.0, 120.0, 40.0, "#d5e8d4", "#82b366"),
        ("process1", "Process Step", "box", 280.0, 130.0, 160.0, 60.0, "#dae8fc", "#6c8ebf"),
        ("decision", "Decision?", "diamond", 290.0, 240.0, 140.0, 80.0, "#fff2cc", "#d6b656"),
        ("process2", "Yes Path", "box", 120.0, 380.0, 140.0, 60.0, "#dae8fc", "#6c8ebf"),
        ("end", "End", "start-end", 480.0, 380.0, 120.0, 40.0, "#f8cecc", "#b85450"),
    ];
    let edges = [
        ("e1", "start", "process1", ""),
        ("e2", "process1", "decision", ""),
        ("e3", "decision", "process2", "Yes"),
        ("e4", "decision", "end", "No"),
        ("e5", "process2", "end", ""),
    ];

    let mut spec = DiagramSpec::new(var(vars, "title", "Flowchart"), 800.0, 600.0);
    for (id, label, shape, x, y, w, h, fill, stroke) in nodes {
        spec.nodes.push(
            NodeDescriptor::new(id)
                .label(label)
                .shape(shape)
                .fill(fill)
                .stroke(stroke)
                .at(x, y)
                .size(w, h),
        );
    }
    for (id, source, target, label) in edges {
        let mut edge = EdgeDescriptor::new(id, source, target);
        if !label.is_empty() {
            edge = edge.label(label);
        }
        spec.edges.push(edge);
    }
    spec
}

const ROW_STYLE: &str = "text;strokeColor=none;fillColor=none;align=left;verticalAlign=middle;spacingLeft=4;spacingRight=4;overflow=hidden;rotatable=0;whiteSpace=wrap;html=1;";

fn erd(_vars: &TemplateVars) -> DiagramSpec {
    let tables: [(&str, &str, f64, f64, &[&str]); 3] = [
        (
            "users_tbl",
            "Users",
            100.0,
            160.0,
            &["id (PK)", "name", "email", "created_at"],
        ),
        (
            "orders_tbl",
            "Orders",
            400.0,
            180.0,
            &["id (PK)", "user_id (FK)", "total", "status", "created_at"],
        ),
        (
            "products_tbl",
            "Products",
            700.0,
            160.0,
            &["id (PK)", "name", "price", "stock"],
        ),
    ];

    let mut spec = DiagramSpec::new("ERD", 1000.0, 600.0);
    for (id, title, x, height, columns) in tables {
        spec.nodes.push(
            NodeDescriptor::new(id)
                .label(title)
                .shape("table")
                .fill("#dae8fc")
                .stroke("#6c8ebf")
                .at(x, 100.0)
                .size(200.0, height),
        );
        for (row, column) in columns.iter().enumerate() {
            spec.nodes.push(
                NodeDescriptor::new(format!("{id}_r{row}"))
                    .label(*column)
                    .style(ROW_STYLE)
                    .parent(id)
                    .at(0.0, 30.0 + row as f64 * 30.0)
                    .size(200.0, 30.0),
            );
        }
    }
    for (id, source, target, label) in [
        ("rel1", "users_tbl", "orders_tbl", "1:N"),
        ("rel2", "orders_tbl", "products_tbl", "N:M"),
    ] {
        spec.edges.push(
            EdgeDescriptor::new(id, source, target)
                .style("entity")
                .color("#6c8ebf")
                .label(label),
        );
    }
    spec
}
