//! # 结构构建与缩放
//!
//! - `create_diamond_fcc`: 按元素生成金刚石结构 FCC 原胞（2 原子）
//! - `rescale`: 按因子缩放晶格向量，生成新结构，不修改输入
//!
//! ## 依赖关系
//! - 被 `workflow/eos.rs`, `commands/structure.rs` 使用
//! - 使用 `models/structure.rs`

use crate::error::{EosError, Result};
use crate::models::{Atom, Crystal, Lattice};

/// 支持的元素及其实验晶格常数 (Å)
const DIAMOND_LATTICE_CONSTANTS: [(&str, f64); 4] =
    [("Si", 5.431), ("C", 3.357), ("Ge", 5.658), ("Sn", 6.489)];

/// 查询元素的晶格常数
pub fn lattice_constant(element: &str) -> Option<f64> {
    DIAMOND_LATTICE_CONSTANTS
        .iter()
        .find(|(symbol, _)| *symbol == element)
        .map(|(_, alat)| *alat)
}

/// 生成金刚石结构 FCC 原胞
pub fn create_diamond_fcc(element: &str) -> Result<Crystal> {
    let alat = lattice_constant(element).ok_or_else(|| EosError::UnsupportedElement {
        element: element.to_string(),
        valid: DIAMOND_LATTICE_CONSTANTS
            .iter()
            .map(|(symbol, _)| *symbol)
            .collect::<Vec<_>>()
            .join(", "),
    })?;

    let half = 0.5 * alat;
    let lattice = Lattice::from_vectors([[0.0, half, half], [half, 0.0, half], [half, half, 0.0]]);

    // 笛卡尔 (0,0,0) 与 (a/4,a/4,a/4) 在该原胞中的分数坐标均为各分量相同
    let atoms = vec![
        Atom::new(element, [0.0, 0.0, 0.0]),
        Atom::new(element, [0.25, 0.25, 0.25]),
    ];

    Ok(Crystal::new(element, lattice, atoms))
}

/// 缩放结构：晶格向量乘以 `factor`，原子分数坐标不变
pub fn rescale(structure: &Crystal, factor: f64) -> Crystal {
    Crystal::new(
        format!("{}_x{:.2}", structure.name, factor),
        structure.lattice.scaled(factor),
        structure.atoms.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_diamond_fcc_si() {
        let si = create_diamond_fcc("Si").unwrap();
        assert_eq!(si.atoms.len(), 2);
        assert_eq!(si.formula(), "Si2");

        // FCC 原胞体积为 a^3 / 4
        let expected = 5.431_f64.powi(3) / 4.0;
        assert!((si.volume() - expected).abs() < 1e-9);

        // 第二个原子位于笛卡尔 (a/4, a/4, a/4)
        let m = si.lattice.matrix;
        let f = si.atoms[1].position;
        for k in 0..3 {
            let cart = f[0] * m[0][k] + f[1] * m[1][k] + f[2] * m[2][k];
            assert!((cart - 5.431 / 4.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_create_diamond_fcc_unsupported() {
        match create_diamond_fcc("Fe") {
            Err(EosError::UnsupportedElement { element, valid }) => {
                assert_eq!(element, "Fe");
                assert!(valid.contains("Si"));
                assert!(valid.contains("Ge"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_rescale_does_not_mutate_base() {
        let base = create_diamond_fcc("Ge").unwrap();
        let snapshot = base.clone();

        let _ = rescale(&base, 0.96);
        let _ = rescale(&base, 1.04);

        assert_eq!(base, snapshot);
    }

    #[test]
    fn test_rescale_unit_factor_is_identity() {
        let base = create_diamond_fcc("C").unwrap();
        let same = rescale(&base, 1.0);

        assert_eq!(same.lattice, base.lattice);
        assert_eq!(same.atoms, base.atoms);
    }

    #[test]
    fn test_rescale_volume_scales_cubically() {
        let base = create_diamond_fcc("Si").unwrap();
        let scaled = rescale(&base, 1.02);

        assert!((scaled.volume() - base.volume() * 1.02_f64.powi(3)).abs() < 1e-9);
        assert_eq!(scaled.name, "Si_x1.02");
    }
}
