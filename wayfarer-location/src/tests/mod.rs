//! Resolver behaviour tests driven through the scripted positioning service.
