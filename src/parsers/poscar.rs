//! # VASP POSCAR 格式输出
//!
//! 将结构写为 POSCAR（VASP 5 格式，分数坐标），便于用常见可视化工具检查扫描结构。
//!
//! ## 依赖关系
//! - 被 `commands/structure.rs`, `commands/run.rs` 使用
//! - 使用 `models/structure.rs`

use crate::error::{EosError, Result};
use crate::models::Crystal;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// 将 Crystal 转换为 POSCAR 格式字符串
pub fn to_poscar_string(crystal: &Crystal) -> String {
    // 按元素分组，保持首次出现顺序
    let elem_order = crystal.species();
    let mut elem_atoms: BTreeMap<&str, Vec<[f64; 3]>> = BTreeMap::new();
    for atom in &crystal.atoms {
        elem_atoms
            .entry(atom.element.as_str())
            .or_default()
            .push(atom.position);
    }

    let mut result = String::new();

    // Line 0: Comment
    result.push_str(&format!("{}\n", crystal.name));

    // Line 1: Scale
    result.push_str("1.0\n");

    // Lines 2-4: Lattice
    for row in &crystal.lattice.matrix {
        result.push_str(&format!(
            "  {:16.10}  {:16.10}  {:16.10}\n",
            row[0], row[1], row[2]
        ));
    }

    // Line 5: Elements
    result.push_str(&format!("   {}\n", elem_order.join("   ")));

    // Line 6: Counts
    let counts: Vec<String> = elem_order
        .iter()
        .map(|e| elem_atoms.get(e).map(|v| v.len()).unwrap_or(0).to_string())
        .collect();
    result.push_str(&format!("   {}\n", counts.join("   ")));

    // Coordinate type
    result.push_str("Direct\n");

    // Atom positions
    for elem in &elem_order {
        if let Some(positions) = elem_atoms.get(elem) {
            for pos in positions {
                result.push_str(&format!(
                    "  {:16.10}  {:16.10}  {:16.10}\n",
                    pos[0], pos[1], pos[2]
                ));
            }
        }
    }

    result
}

/// 写入 POSCAR 文件
pub fn write_poscar_file(crystal: &Crystal, path: &Path) -> Result<()> {
    fs::write(path, to_poscar_string(crystal)).map_err(|e| EosError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Atom, Lattice};
    use crate::structures::create_diamond_fcc;

    #[test]
    fn test_poscar_diamond() {
        let si = create_diamond_fcc("Si").unwrap();
        let text = to_poscar_string(&si);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Si");
        assert_eq!(lines[1], "1.0");
        assert_eq!(lines[5].trim(), "Si");
        assert_eq!(lines[6].trim(), "2");
        assert_eq!(lines[7], "Direct");
        assert_eq!(lines.len(), 10);

        let first_vec: Vec<f64> = lines[2]
            .split_whitespace()
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(first_vec, vec![0.0, 2.7155, 2.7155]);
    }

    #[test]
    fn test_poscar_groups_elements() {
        let lattice = Lattice::from_vectors([[4.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 4.0]]);
        let atoms = vec![
            Atom::new("O", [0.5, 0.5, 0.0]),
            Atom::new("Ti", [0.0, 0.0, 0.0]),
            Atom::new("O", [0.5, 0.0, 0.5]),
        ];
        let crystal = Crystal::new("TiO2", lattice, atoms);
        let text = to_poscar_string(&crystal);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[5].split_whitespace().collect::<Vec<_>>(), vec!["O", "Ti"]);
        assert_eq!(lines[6].split_whitespace().collect::<Vec<_>>(), vec!["2", "1"]);
    }

    #[test]
    fn test_write_poscar_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Si.POSCAR");
        let si = create_diamond_fcc("Si").unwrap();

        write_poscar_file(&si, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), to_poscar_string(&si));
    }
}
