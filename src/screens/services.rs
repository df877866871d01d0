// 🚰 Services - water-company catalog
// Selecting any company (or the recent-payment shortcut) leads to the
// same water-payment form.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaterCompany {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub is_favorite: bool,
}

pub fn water_companies() -> [WaterCompany; 4] {
    [
        WaterCompany {
            id: "epmaps",
            name: "EPMAPS - Quito",
            description: "Empresa Pública Metropolitana de Agua Potable",
            is_favorite: true,
        },
        WaterCompany {
            id: "etapa",
            name: "ETAPA - Cuenca",
            description: "Empresa Telecomunicaciones, Agua Potable",
            is_favorite: false,
        },
        WaterCompany {
            id: "emapag",
            name: "EMAPAG - Guayaquil",
            description: "Empresa Municipal de Agua Potable",
            is_favorite: false,
        },
        WaterCompany {
            id: "emapa",
            name: "EMAPA - Ambato",
            description: "Empresa Municipal de Agua Potable",
            is_favorite: false,
        },
    ]
}

/// Shortcut shown under "Pagos recientes".
pub fn recent_payment() -> (&'static str, &'static str, &'static str) {
    ("EPMAPS - Quito", "***6789", "Sep 23, 2025")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_one_favorite() {
        let companies = water_companies();
        assert_eq!(companies.len(), 4);
        assert_eq!(companies.iter().filter(|c| c.is_favorite).count(), 1);
        assert_eq!(companies[0].id, "epmaps");
    }
}
