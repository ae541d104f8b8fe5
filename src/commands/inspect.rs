//! # inspect 命令实现
//!
//! 读取单个结构，逐个 (位点, CN 方法) 打印多面体结果，
//! 便于排查哪些位点被跳过或凸包退化。
//!
//! ## 依赖关系
//! - 使用 `cli/inspect.rs` 定义的 InspectArgs
//! - 使用 `parsers/` 读取结构，`features/polyhedron.rs` 计算多面体
//! - 使用 `tabled` 打印表格

use crate::cli::inspect::InspectArgs;
use crate::error::{CoordfeatError, Result};
use crate::features::{self, PolyhedronOutcome, PolyhedronTable};
use crate::geometry::ConvexHullGeometry;
use crate::models::{CnSelector, StructureInput};
use crate::parsers;
use crate::roles::{MendeleevClassifier, RoleClassifier, RoleSet};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 多面体结果行
#[derive(Debug, Clone, Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "CN")]
    cn: usize,
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Vertices")]
    vertices: String,
    #[tabled(rename = "Volume (Å³)")]
    volume: String,
}

/// 执行 inspect 命令
pub fn execute(args: InspectArgs) -> Result<()> {
    output::print_header("Coordination Polyhedra");

    if !args.input.is_file() {
        return Err(CoordfeatError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let structure = parsers::parse_structure_file(&args.input)?;
    let roles = MendeleevClassifier.classify(&structure.unique_elements)?;
    let assignment: Vec<String> = roles.iter().map(|(r, e)| format!("{}={}", r, e)).collect();
    output::print_info(&format!(
        "Structure '{}': {} sites, {}-element roles [{}]",
        structure.name,
        structure.connections.len(),
        roles.arity(),
        assignment.join(", ")
    ));

    let table = features::compute_polyhedron_table(&structure, &structure, &ConvexHullGeometry)?;
    let rows = outcome_rows(&structure, &table, &roles);

    if rows.is_empty() {
        output::print_warning("No CN selection found in the structure");
        return Ok(());
    }

    println!("{}", Table::new(&rows));

    let metrics = features::to_metric_table(&table);
    for site in table.keys() {
        if metrics.site(site).is_none() {
            output::print_skip(&format!("{}: no polyhedron for any method", site));
        }
    }

    output::print_separator();
    if metrics.is_empty() {
        output::print_warning("No polyhedron could be built for this structure");
    } else {
        output::print_success(&format!(
            "{} of {} sites have at least one polyhedron",
            metrics.len(),
            table.len()
        ));
    }

    Ok(())
}

/// 展开多面体结果表
fn outcome_rows(structure: &StructureInput, table: &PolyhedronTable, roles: &RoleSet) -> Vec<OutcomeRow> {
    let mut rows = Vec::new();

    for (site, methods) in table {
        let role = structure
            .connections
            .get(site)
            .and_then(|s| roles.role_of(&s.element))
            .unwrap_or("-")
            .to_string();
        for (method, outcome) in methods {
            let cn = structure.coordination_number(site, method).unwrap_or(0);
            let (vertices, volume) = match outcome {
                PolyhedronOutcome::Computed(m) => (
                    m.number_of_vertices.to_string(),
                    format!("{:.4}", m.volume_of_polyhedron),
                ),
                _ => ("-".to_string(), "-".to_string()),
            };
            rows.push(OutcomeRow {
                site: site.clone(),
                role: role.clone(),
                method: method.clone(),
                cn,
                outcome: outcome.to_string(),
                vertices,
                volume,
            });
        }
    }

    rows
}
