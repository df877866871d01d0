// 🏠 Home - welcome screen with the service grid
// Only the water tile navigates anywhere; the rest are decoration in
// this prototype.

pub const WELCOME_NAME: &str = "Juan Carlos Pérez";
pub const BALANCE_LABEL: &str = "$2,450.75";
pub const BALANCE_ACCOUNT: &str = "Cuenta de Ahorros ***1234";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceTile {
    pub id: &'static str,
    pub label: &'static str,
    /// Whether tapping the tile goes anywhere in this prototype
    pub navigates: bool,
}

/// The 4x2 service grid.
pub fn service_tiles() -> [ServiceTile; 8] {
    [
        ServiceTile { id: "water", label: "Agua Potable", navigates: true },
        ServiceTile { id: "electricity", label: "Luz Eléctrica", navigates: false },
        ServiceTile { id: "phone", label: "Telefonía", navigates: false },
        ServiceTile { id: "credit", label: "Tarjetas", navigates: false },
        ServiceTile { id: "vehicle", label: "Vehículo", navigates: false },
        ServiceTile { id: "investments", label: "Inversiones", navigates: false },
        ServiceTile { id: "transfers", label: "Transferir", navigates: false },
        ServiceTile { id: "more", label: "Más", navigates: false },
    ]
}

/// Recent activity entries under the grid.
pub fn recent_activity() -> [(&'static str, &'static str, &'static str); 2] {
    [
        ("EPMAPS - Agua Potable", "Sep 23, 2025", "-$28.50"),
        ("EEQ - Luz Eléctrica", "Sep 15, 2025", "-$45.20"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_water_tile_navigates() {
        let tiles = service_tiles();
        assert_eq!(tiles.len(), 8);
        let navigable: Vec<_> = tiles.iter().filter(|t| t.navigates).collect();
        assert_eq!(navigable.len(), 1);
        assert_eq!(navigable[0].id, "water");
    }
}
