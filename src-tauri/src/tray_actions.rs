pub const TRAY_MENU_DASHBOARD: &str = "tray_dashboard";
pub const TRAY_MENU_EXIT: &str = "tray_exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayMenuAction {
    Dashboard,
    Exit,
}

pub fn action_from_menu_id(menu_id: &str) -> Option<TrayMenuAction> {
    match menu_id {
        TRAY_MENU_DASHBOARD => Some(TrayMenuAction::Dashboard),
        TRAY_MENU_EXIT => Some(TrayMenuAction::Exit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_from_menu_id_maps_all_known_actions() {
        assert_eq!(
            action_from_menu_id(TRAY_MENU_DASHBOARD),
            Some(TrayMenuAction::Dashboard)
        );
        assert_eq!(action_from_menu_id(TRAY_MENU_EXIT), Some(TrayMenuAction::Exit));
    }

    #[test]
    fn action_from_menu_id_returns_none_for_unknown_menu_id() {
        assert_eq!(action_from_menu_id("unknown-menu"), None);
        assert_eq!(action_from_menu_id(""), None);
    }
}
