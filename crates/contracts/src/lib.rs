//! Общие типы (DTO) между движком импорта/генерации и его вызывающими сторонами

pub mod domain;
pub mod enums;
pub mod usecases;
