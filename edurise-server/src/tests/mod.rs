mod auth_service;
