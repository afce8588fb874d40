//! Constantes del motor de transferencia.
//!
//! Valores estáticos que participan en el cálculo de huellas de lote.
//! Cambios aquí alteran las huellas aunque los datos escritos no cambien,
//! porque `ENGINE_VERSION` forma parte del input del hashing.

/// Versión lógica del motor. Se incluye en el input de la huella de cada
/// lote confirmado para que un cambio incompatible del motor produzca
/// huellas distintas con los mismos datos. Mantener estable mientras no
/// cambie el formato del input.
pub const ENGINE_VERSION: &str = "T1.0";
