//! User-facing text published to the UI error channel.
//!
//! The console is operated in Spanish, so every message shown to an operator
//! lives here.

pub const UNEXPECTED_ERROR: &str = "Ha ocurrido un error inesperado.";
pub const SESSION_EXPIRED: &str = "Tu sesión ha expirado. Por favor, inicia sesión de nuevo.";
pub const SERVER_UNREACHABLE: &str = "No se pudo conectar con el servidor. Verifica tu conexión.";
pub const REQUEST_CONFIGURATION: &str = "Error en la configuración de la petición.";

pub const IDENTIFIER_REQUIRED: &str = "El correo electrónico es obligatorio";
pub const PASSWORD_REQUIRED: &str = "La contraseña es obligatoria";
pub const INVALID_CREDENTIALS: &str =
    "Correo o contraseña incorrectos. Por favor verifica tus credenciales.";
pub const EMAIL_NOT_CONFIRMED: &str =
    "Por favor confirma tu dirección de correo antes de iniciar sesión.";
pub const VALIDATION_PREFIX: &str = "Error de validación: ";
pub const LOGIN_FAILED: &str = "Error al intentar iniciar sesión. Por favor intenta nuevamente.";
pub const INVALID_SERVER_RESPONSE: &str = "Respuesta del servidor inválida";

pub const DOCUMENT_ID_REQUIRED: &str = "Se requiere documentId para modificar la entrada.";
pub const DOCUMENT_ID_REQUIRED_FOR_UPDATE: &str =
    "Se requiere documentId para actualizar la entrada.";
pub const DOCUMENT_ID_REQUIRED_FOR_DELETE: &str =
    "Se requiere documentId para eliminar la entrada.";
pub const UPLOAD_NO_CREDENTIAL: &str =
    "No se pudo subir el archivo: no hay token de autenticación disponible.";

/// Message for a `findOne` lookup that matched nothing.
pub fn item_not_found(id: impl core::fmt::Display) -> String {
    format!("Item con ID {id} no encontrado.")
}

pub const UPLOAD_NO_FILES: &str = "No se seleccionó ningún archivo para subir.";
