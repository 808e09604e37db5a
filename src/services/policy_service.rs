//! Access Policy Gate
//!
//! Mapeo puro (rol, operación) -> permitido/denegado, evaluado antes de
//! invocar cualquier controller de escritura. Consolida en una sola tabla
//! los chequeos de rol que el sistema aplica por endpoint; las lecturas
//! solo requieren autenticación.

use crate::models::user::UserRole;
use crate::utils::errors::{AppError, AppResult};

/// Operaciones reconocidas por la política de acceso
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateRoute,
    UpdateRoute,
    DeleteRoute,
    CreateCargo,
    UpdateCargo,
    DeleteCargo,
    CreateVehicle,
    UpdateVehicle,
    DeleteVehicle,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CreateRoute => "create-route",
            Operation::UpdateRoute => "update-route",
            Operation::DeleteRoute => "delete-route",
            Operation::CreateCargo => "create-cargo",
            Operation::UpdateCargo => "update-cargo",
            Operation::DeleteCargo => "delete-cargo",
            Operation::CreateVehicle => "create-vehicle",
            Operation::UpdateVehicle => "update-vehicle",
            Operation::DeleteVehicle => "delete-vehicle",
        }
    }
}

/// Tabla de permisos del sistema
pub fn is_allowed(role: UserRole, operation: Operation) -> bool {
    use Operation::*;
    use UserRole::*;

    match operation {
        CreateRoute => matches!(role, Logistics),
        UpdateRoute => matches!(role, Logistics | Security),
        DeleteRoute => matches!(role, Logistics),
        CreateCargo => matches!(role, Logistics),
        UpdateCargo => matches!(role, Logistics),
        DeleteCargo => matches!(role, Logistics | Hr),
        CreateVehicle => matches!(role, Logistics | Hr),
        UpdateVehicle => matches!(role, Logistics),
        DeleteVehicle => matches!(role, Hr),
    }
}

/// Evalúa la tabla y produce `Forbidden` en caso de denegación.
/// Sin efectos secundarios.
pub fn authorize(role: UserRole, operation: Operation) -> AppResult<()> {
    if is_allowed(role, operation) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "role '{}' is not allowed to perform '{}'",
            role.as_str(),
            operation.as_str()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_operations() {
        assert!(is_allowed(UserRole::Logistics, Operation::CreateRoute));
        assert!(!is_allowed(UserRole::Hr, Operation::CreateRoute));
        assert!(!is_allowed(UserRole::Security, Operation::CreateRoute));
        assert!(!is_allowed(UserRole::Driver, Operation::CreateRoute));

        assert!(is_allowed(UserRole::Logistics, Operation::UpdateRoute));
        assert!(is_allowed(UserRole::Security, Operation::UpdateRoute));
        assert!(!is_allowed(UserRole::Hr, Operation::UpdateRoute));

        assert!(is_allowed(UserRole::Logistics, Operation::DeleteRoute));
        assert!(!is_allowed(UserRole::Security, Operation::DeleteRoute));
    }

    #[test]
    fn test_cargo_operations() {
        assert!(is_allowed(UserRole::Logistics, Operation::CreateCargo));
        assert!(!is_allowed(UserRole::Hr, Operation::CreateCargo));

        assert!(is_allowed(UserRole::Logistics, Operation::UpdateCargo));
        assert!(!is_allowed(UserRole::Security, Operation::UpdateCargo));

        assert!(is_allowed(UserRole::Logistics, Operation::DeleteCargo));
        assert!(is_allowed(UserRole::Hr, Operation::DeleteCargo));
        assert!(!is_allowed(UserRole::Driver, Operation::DeleteCargo));
    }

    #[test]
    fn test_vehicle_operations() {
        assert!(is_allowed(UserRole::Logistics, Operation::CreateVehicle));
        assert!(is_allowed(UserRole::Hr, Operation::CreateVehicle));
        assert!(!is_allowed(UserRole::Driver, Operation::CreateVehicle));

        assert!(is_allowed(UserRole::Logistics, Operation::UpdateVehicle));
        assert!(!is_allowed(UserRole::Hr, Operation::UpdateVehicle));

        assert!(is_allowed(UserRole::Hr, Operation::DeleteVehicle));
        assert!(!is_allowed(UserRole::Logistics, Operation::DeleteVehicle));
    }

    #[test]
    fn test_driver_cannot_write_anything() {
        for op in [
            Operation::CreateRoute,
            Operation::UpdateRoute,
            Operation::DeleteRoute,
            Operation::CreateCargo,
            Operation::UpdateCargo,
            Operation::DeleteCargo,
            Operation::CreateVehicle,
            Operation::UpdateVehicle,
            Operation::DeleteVehicle,
        ] {
            assert!(!is_allowed(UserRole::Driver, op), "driver allowed {:?}", op);
        }
    }

    #[test]
    fn test_authorize_produces_forbidden() {
        assert!(authorize(UserRole::Logistics, Operation::CreateRoute).is_ok());
        let err = authorize(UserRole::Driver, Operation::CreateRoute).unwrap_err();
        assert!(matches!(err, crate::utils::errors::AppError::Forbidden(_)));
    }
}
