pub mod audit_media_use_case;
