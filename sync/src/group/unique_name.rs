use std::collections::HashSet;

use crate::{GroupName, RegistryError};

/// Hands out group names nobody else uses, for sub-instances that synchronize
/// only with themselves. Released names are reused, most recent first, before
/// a new one is minted.
pub struct UniqueNameAllocator {
    prefix: String,
    next_id: u32,
    free_names: Vec<GroupName>,
    allocated: HashSet<GroupName>,
}

impl UniqueNameAllocator {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next_id: 0,
            free_names: Vec::new(),
            allocated: HashSet::new(),
        }
    }

    pub fn allocate(&mut self) -> GroupName {
        let name = match self.free_names.pop() {
            Some(name) => name,
            None => {
                let name = GroupName::from(format!("{}_{}", self.prefix, self.next_id));
                self.next_id += 1;
                name
            }
        };
        self.allocated.insert(name.clone());
        name
    }

    pub fn release(&mut self, name: &GroupName) -> Result<(), RegistryError> {
        if !self.allocated.remove(name) {
            return Err(RegistryError::UnknownUniqueName { name: name.clone() });
        }
        self.free_names.push(name.clone());
        Ok(())
    }

    pub fn allocated_count(&self) -> usize {
        self.allocated.len()
    }
}
