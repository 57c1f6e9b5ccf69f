use crate::{MemberUpdateState, MembershipRequest, PlayerKey, SyncRole};

pub struct GroupMember {
    key: PlayerKey,
    update_state: MemberUpdateState,
    request: MembershipRequest,
    is_active: bool,
    just_joined: bool,
}

impl GroupMember {
    pub(crate) fn new(
        key: PlayerKey,
        request: &MembershipRequest,
        update_state: MemberUpdateState,
    ) -> Self {
        Self {
            key,
            update_state,
            request: request.clone(),
            is_active: true,
            just_joined: true,
        }
    }

    pub fn key(&self) -> PlayerKey {
        self.key
    }

    pub fn role(&self) -> SyncRole {
        self.request.role
    }

    pub fn request(&self) -> &MembershipRequest {
        &self.request
    }

    pub fn update_state(&self) -> &MemberUpdateState {
        &self.update_state
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn just_joined(&self) -> bool {
        self.just_joined
    }

    pub(crate) fn refresh(&mut self, request: &MembershipRequest, update_state: MemberUpdateState) {
        self.request.clone_from(request);
        self.update_state = update_state;
        self.is_active = true;
    }

    pub(crate) fn reset_for_tick(&mut self) {
        self.is_active = false;
        self.just_joined = false;
    }
}
